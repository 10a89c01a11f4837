use serde::{Deserialize, Serialize};

use super::Identified;

/// A ranked professor recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professor {
    pub id: String,
    pub name: String,
    /// Compatibility with the student, always finite and within `[0, 1]`
    pub score: f64,
    pub specialty: String,
    pub methodology: String,
    pub experience: String,
}

impl Professor {
    /// Score as a rounded whole percentage.
    pub fn compatibility_percent(&self) -> u8 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl Identified for Professor {
    fn id(&self) -> &str {
        &self.id
    }
}
