//! In-memory fake gateway (testing only)
//!
//! `ScriptedGateway` answers every operation from a scripted outcome and
//! records the calls it received, so workflow tests can assert on both the
//! resulting state and the traffic that produced it.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::error::GatewayError;
use crate::gateway::{AssignmentGateway, AssignmentRequest, GatewayResult, RawPayload};

/// One recorded gateway invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    GetStudent { name: String },
    HealthCheck,
    GetRecommendations { student_name: String, limit: u32 },
    ListCourses { student_name: String },
    RegisterAssignment(AssignmentRequest),
}

/// Gateway whose answers are fixed up front.
///
/// Defaults: unknown student, healthy service, empty recommendation and
/// course listings, and every registration succeeds.
#[derive(Debug)]
pub struct ScriptedGateway {
    student: GatewayResult<Option<RawPayload>>,
    health: GatewayResult<()>,
    recommendations: GatewayResult<RawPayload>,
    courses: GatewayResult<RawPayload>,
    registrations: Mutex<VecDeque<GatewayResult<()>>>,
    fetch_delay: Option<Duration>,
    health_delay: Option<Duration>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            student: Ok(None),
            health: Ok(()),
            recommendations: Ok(RawPayload(json!([]))),
            courses: Ok(RawPayload(json!([]))),
            registrations: Mutex::new(VecDeque::new()),
            fetch_delay: None,
            health_delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read operation fails with `GatewayError::Unreachable(reason)`.
    pub fn offline(reason: &str) -> Self {
        let err = GatewayError::Unreachable(reason.to_string());
        Self {
            student: Err(err.clone()),
            health: Err(err.clone()),
            recommendations: Err(err.clone()),
            courses: Err(err.clone()),
            ..Self::default()
        }
    }

    pub fn with_student(mut self, payload: serde_json::Value) -> Self {
        self.student = Ok(Some(RawPayload(payload)));
        self
    }

    pub fn with_student_result(mut self, result: GatewayResult<Option<RawPayload>>) -> Self {
        self.student = result;
        self
    }

    pub fn with_health(mut self, result: GatewayResult<()>) -> Self {
        self.health = result;
        self
    }

    pub fn with_recommendations(mut self, payload: serde_json::Value) -> Self {
        self.recommendations = Ok(RawPayload(payload));
        self
    }

    pub fn with_recommendations_result(mut self, result: GatewayResult<RawPayload>) -> Self {
        self.recommendations = result;
        self
    }

    pub fn with_courses(mut self, payload: serde_json::Value) -> Self {
        self.courses = Ok(RawPayload(payload));
        self
    }

    pub fn with_courses_result(mut self, result: GatewayResult<RawPayload>) -> Self {
        self.courses = result;
        self
    }

    /// Queue the outcome of the next unanswered registration.
    pub fn then_register(self, result: GatewayResult<()>) -> Self {
        lock(&self.registrations).push_back(result);
        self
    }

    /// Delay applied to student, recommendation and course reads.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = Some(delay);
        self
    }

    /// Snapshot of every call received so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.calls).clone()
    }

    pub fn registration_count(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| matches!(c, GatewayCall::RegisterAssignment(_)))
            .count()
    }

    fn record(&self, call: GatewayCall) {
        lock(&self.calls).push(call);
    }

    async fn pause(delay: Option<Duration>) {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AssignmentGateway for ScriptedGateway {
    async fn get_student(&self, name: &str) -> GatewayResult<Option<RawPayload>> {
        self.record(GatewayCall::GetStudent {
            name: name.to_string(),
        });
        Self::pause(self.fetch_delay).await;
        self.student.clone()
    }

    async fn health_check(&self) -> GatewayResult<()> {
        self.record(GatewayCall::HealthCheck);
        Self::pause(self.health_delay).await;
        self.health.clone()
    }

    async fn get_recommendations(
        &self,
        student_name: &str,
        limit: u32,
    ) -> GatewayResult<RawPayload> {
        self.record(GatewayCall::GetRecommendations {
            student_name: student_name.to_string(),
            limit,
        });
        Self::pause(self.fetch_delay).await;
        self.recommendations.clone()
    }

    async fn list_courses(&self, student_name: &str) -> GatewayResult<RawPayload> {
        self.record(GatewayCall::ListCourses {
            student_name: student_name.to_string(),
        });
        Self::pause(self.fetch_delay).await;
        self.courses.clone()
    }

    async fn register_assignment(&self, request: &AssignmentRequest) -> GatewayResult<()> {
        self.record(GatewayCall::RegisterAssignment(request.clone()));
        Self::pause(self.fetch_delay).await;
        lock(&self.registrations).pop_front().unwrap_or(Ok(()))
    }
}
