use serde::{Deserialize, Serialize};

/// Student profile shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub full_name: String,
    /// Enrollment code (carné), unique per student
    pub enrollment_code: String,
    pub program: String,
    /// Curriculum version (pensum)
    pub curriculum: String,
    pub prior_term_average: f64,
    pub grade_level: u32,
    /// Human-readable maximum course load
    pub max_load: String,
}
