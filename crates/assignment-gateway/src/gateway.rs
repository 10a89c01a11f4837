//! Gateway trait definition
//!
//! `AssignmentGateway` is the only seam between the workflow and the remote
//! data service. Every operation is async and may fail at any time; callers
//! decide how to degrade. Payloads are returned raw (untyped JSON) so the
//! normalizer can tolerate renamed or missing fields.
//!
//! An in-memory fake is provided for testing via the `fakes` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Result type for gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Untyped JSON payload exactly as the remote service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(pub serde_json::Value);

impl RawPayload {
    pub fn new(value: serde_json::Value) -> Self {
        RawPayload(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for RawPayload {
    fn from(value: serde_json::Value) -> Self {
        RawPayload(value)
    }
}

/// Body of an assignment registration.
///
/// Field names on the wire follow the service's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    #[serde(rename = "estudiante")]
    pub student_name: String,
    #[serde(rename = "profesor")]
    pub professor_name: String,
    #[serde(rename = "curso")]
    pub course_code: String,
}

impl AssignmentRequest {
    pub fn new(
        student_name: impl Into<String>,
        professor_name: impl Into<String>,
        course_code: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            professor_name: professor_name.into(),
            course_code: course_code.into(),
        }
    }
}

/// Remote data service consumed by the assignment workflow.
#[async_trait]
pub trait AssignmentGateway: Send + Sync {
    /// Look up a student by full name. `Ok(None)` means the service does not
    /// know the student.
    async fn get_student(&self, name: &str) -> GatewayResult<Option<RawPayload>>;

    /// Liveness probe.
    async fn health_check(&self) -> GatewayResult<()>;

    /// Ranked professor recommendations for a student, at most `limit` entries.
    async fn get_recommendations(&self, student_name: &str, limit: u32)
        -> GatewayResult<RawPayload>;

    /// Courses the student may be assigned to.
    async fn list_courses(&self, student_name: &str) -> GatewayResult<RawPayload>;

    /// Commit an assignment. Any error means the assignment did not happen.
    async fn register_assignment(&self, request: &AssignmentRequest) -> GatewayResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assignment_request_uses_service_field_names() {
        let request = AssignmentRequest::new("Ana", "Dr. X", "MAT101");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"estudiante": "Ana", "profesor": "Dr. X", "curso": "MAT101"})
        );
    }

    #[test]
    fn test_raw_payload_is_transparent() {
        let raw: RawPayload = serde_json::from_str(r#"[{"nombre":"Dr. X"}]"#).unwrap();
        assert!(raw.as_value().is_array());
    }
}
