use serde::{Deserialize, Serialize};

use super::Identified;

/// A course the student can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl Identified for Course {
    fn id(&self) -> &str {
        &self.id
    }
}
