//! Workflow tuning knobs.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Recommendations requested per course
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 5;

/// Time the success message stays visible before returning to the course list
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// What a failed health check does on the dashboard and course list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthCheckPolicy {
    /// Warn in the logs only.
    #[default]
    LogOnly,
    /// Also expose a warning to the screen. The primary data is unaffected.
    Surface,
}

impl FromStr for HealthCheckPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "log-only" | "log_only" => Ok(HealthCheckPolicy::LogOnly),
            "surface" => Ok(HealthCheckPolicy::Surface),
            _ => Err(ConfigError::InvalidValue {
                var: "ASSIGNMENT_HEALTH_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub recommendation_limit: u32,
    pub redirect_delay_ms: u64,
    pub health_policy: HealthCheckPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            health_policy: HealthCheckPolicy::default(),
        }
    }
}

impl WorkflowConfig {
    /// Defaults overlaid with `ASSIGNMENT_RECOMMENDATION_LIMIT`,
    /// `ASSIGNMENT_REDIRECT_DELAY_MS` and `ASSIGNMENT_HEALTH_POLICY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup("ASSIGNMENT_RECOMMENDATION_LIMIT") {
            config.recommendation_limit = parse_var("ASSIGNMENT_RECOMMENDATION_LIMIT", &value)?;
        }
        if let Some(value) = lookup("ASSIGNMENT_REDIRECT_DELAY_MS") {
            config.redirect_delay_ms = parse_var("ASSIGNMENT_REDIRECT_DELAY_MS", &value)?;
        }
        if let Some(value) = lookup("ASSIGNMENT_HEALTH_POLICY") {
            config.health_policy = value.parse()?;
        }
        Ok(config)
    }

    pub fn with_recommendation_limit(mut self, limit: u32) -> Self {
        self.recommendation_limit = limit;
        self
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_health_policy(mut self, policy: HealthCheckPolicy) -> Self {
        self.health_policy = policy;
        self
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
