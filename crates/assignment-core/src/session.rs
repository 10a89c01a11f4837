//! Identity the workflow runs as.

use serde::{Deserialize, Serialize};

use crate::fallback::DEFAULT_STUDENT_NAME;

/// The signed-in student, handed explicitly to every screen.
///
/// Sourced from whatever authenticates the student; this crate only carries
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    student_name: String,
}

impl Session {
    pub fn new(student_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
        }
    }

    /// `ASSIGNMENT_STUDENT_NAME` when set and non-blank, else the default
    /// identity.
    pub fn from_env() -> Self {
        std::env::var("ASSIGNMENT_STUDENT_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_STUDENT_NAME)
    }
}
