//! Fire-and-forget health check.
//!
//! The probe runs as a detached task next to the screen's primary fetch. Its
//! only output is a `watch` channel the screen may read for a warning; it
//! never touches the screen's load state.

use std::sync::Arc;

use assignment_gateway::AssignmentGateway;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::HealthCheckPolicy;
use crate::obs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Checking,
    Reachable,
    Unreachable { reason: String },
}

/// Handle to a running (or finished) health check. Dropping it aborts the
/// check.
#[derive(Debug)]
pub struct HealthProbe {
    status: watch::Receiver<HealthStatus>,
    task: JoinHandle<()>,
    policy: HealthCheckPolicy,
}

impl HealthProbe {
    /// Start a health check on the current Tokio runtime.
    pub fn spawn(gateway: Arc<dyn AssignmentGateway>, policy: HealthCheckPolicy) -> Self {
        let (tx, rx) = watch::channel(HealthStatus::Checking);
        let task = tokio::spawn(
            async move {
                let status = match gateway.health_check().await {
                    Ok(()) => {
                        obs::emit_health_checked(None);
                        HealthStatus::Reachable
                    }
                    Err(err) => {
                        obs::emit_health_checked(Some(&err as &dyn std::fmt::Display));
                        HealthStatus::Unreachable {
                            reason: err.to_string(),
                        }
                    }
                };
                let _ = tx.send(status);
            }
            .in_current_span(),
        );

        Self {
            status: rx,
            task,
            policy,
        }
    }

    pub fn status(&self) -> HealthStatus {
        self.status.borrow().clone()
    }

    /// Warning for the screen, only under [`HealthCheckPolicy::Surface`].
    pub fn warning(&self) -> Option<String> {
        match (self.policy, self.status()) {
            (HealthCheckPolicy::Surface, HealthStatus::Unreachable { reason }) => {
                Some(format!("service health check failed: {reason}"))
            }
            _ => None,
        }
    }

    /// Wait until the check has an answer.
    pub async fn settled(&mut self) -> HealthStatus {
        let _ = self
            .status
            .wait_for(|s| !matches!(s, HealthStatus::Checking))
            .await;
        self.status()
    }
}

impl Drop for HealthProbe {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignment_gateway::fakes::ScriptedGateway;
    use assignment_gateway::GatewayError;

    #[tokio::test]
    async fn test_reachable_service() {
        let mut probe = HealthProbe::spawn(
            Arc::new(ScriptedGateway::new()),
            HealthCheckPolicy::Surface,
        );
        assert_eq!(probe.settled().await, HealthStatus::Reachable);
        assert_eq!(probe.warning(), None);
    }

    #[tokio::test]
    async fn test_unreachable_is_log_only_by_default() {
        let gateway = ScriptedGateway::new()
            .with_health(Err(GatewayError::Unreachable("connection refused".into())));
        let mut probe = HealthProbe::spawn(Arc::new(gateway), HealthCheckPolicy::LogOnly);

        assert!(matches!(
            probe.settled().await,
            HealthStatus::Unreachable { .. }
        ));
        assert_eq!(probe.warning(), None);
    }

    #[tokio::test]
    async fn test_surface_policy_exposes_warning() {
        let gateway = ScriptedGateway::new()
            .with_health(Err(GatewayError::Unreachable("connection refused".into())));
        let mut probe = HealthProbe::spawn(Arc::new(gateway), HealthCheckPolicy::Surface);

        probe.settled().await;
        assert!(probe.warning().unwrap().contains("connection refused"));
    }
}
