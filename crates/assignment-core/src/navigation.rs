//! Navigation bridge contract.
//!
//! Routing belongs to the host application. The workflow only needs to hand a
//! course and a student identity to the next screen and to redirect after a
//! successful assignment.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::Course;

/// Screens the workflow can send the student to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Dashboard,
    CourseList,
    ProfessorSelection { course_id: String },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => write!(f, "/"),
            Route::CourseList => write!(f, "/cursos"),
            Route::ProfessorSelection { course_id } => write!(f, "/cursos/{course_id}"),
        }
    }
}

/// In-memory state carried to the next screen. Never persisted; every field
/// may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub course: Option<Course>,
    pub student_name: Option<String>,
}

/// Host-side router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, state: Option<NavigationState>);
}

/// One navigation observed by [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub route: Route,
    pub state: Option<NavigationState>,
}

/// Navigator that only remembers where it was asked to go.
///
/// Used by tests and by headless runs of the workflow.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    records: Mutex<Vec<NavigationRecord>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<NavigationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<NavigationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route, state: Option<NavigationState>) {
        tracing::debug!(event = "navigation.requested", route = %route);
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(NavigationRecord { route, state });
    }
}
