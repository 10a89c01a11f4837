//! The multi-screen assignment workflow.
//!
//! Three screens, each owning its own state:
//!
//! - [`DashboardScreen`]: student profile
//! - [`CourseListScreen`]: courses, hands the chosen one to the next screen
//! - [`SelectionScreen`]: ranked professors, single selection, confirm
//!
//! Every screen mounts synchronously into `loading`, then [`load`] settles it
//! into `ready`, with fallback data and a warning when the service failed.
//! Nothing here is fatal.
//!
//! [`load`]: DashboardScreen::load

pub mod course_list;
pub mod dashboard;
pub mod health;
pub mod screen;
pub mod selection;

use std::sync::Arc;

use assignment_gateway::AssignmentGateway;

use crate::config::WorkflowConfig;
use crate::navigation::Navigator;
use crate::session::Session;

pub use course_list::{CourseListScreen, CourseListView};
pub use dashboard::{DashboardScreen, DashboardView};
pub use health::{HealthProbe, HealthStatus};
pub use screen::{FetchTicket, LoadState, ScreenId, ScreenKind, ScreenState, Tagged};
pub use selection::{
    AssignmentReceipt, AssignmentStatus, CommitAttempt, SelectionScreen, SelectionView,
};

/// Collaborators and settings shared by every screen.
///
/// Cloning is cheap; each screen keeps its own copy.
#[derive(Clone)]
pub struct WorkflowContext {
    gateway: Arc<dyn AssignmentGateway>,
    navigator: Arc<dyn Navigator>,
    config: WorkflowConfig,
    session: Session,
}

impl WorkflowContext {
    pub fn new(
        gateway: Arc<dyn AssignmentGateway>,
        navigator: Arc<dyn Navigator>,
        session: Session,
    ) -> Self {
        Self {
            gateway,
            navigator,
            config: WorkflowConfig::default(),
            session,
        }
    }

    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn gateway(&self) -> Arc<dyn AssignmentGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
