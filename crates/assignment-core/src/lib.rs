//! Course Assignment Core
//!
//! Client-side workflow for assigning a professor to a course: three screens
//! that load from an [`AssignmentGateway`], normalize loosely typed payloads,
//! substitute built-in sample data when the service is unavailable, and drive
//! a single confirm action through to a delayed redirect.
//!
//! [`AssignmentGateway`]: assignment_gateway::AssignmentGateway

pub mod config;
pub mod domain;
pub mod fallback;
pub mod navigation;
pub mod normalize;
pub mod obs;
pub mod session;
pub mod telemetry;
pub mod workflow;

pub use config::{ConfigError, HealthCheckPolicy, WorkflowConfig};

pub use domain::{
    CommitError, Course, FetchError, Identified, NormalizationError, Professor, Result, Student,
    WorkflowError,
};

pub use navigation::{NavigationRecord, NavigationState, Navigator, RecordingNavigator, Route};

pub use session::Session;

pub use telemetry::{init_tracing, LogFormat};

pub use workflow::{
    AssignmentReceipt, AssignmentStatus, CommitAttempt, CourseListScreen, CourseListView,
    DashboardScreen, DashboardView, HealthProbe, HealthStatus, LoadState, ScreenId, ScreenKind,
    SelectionScreen, SelectionView, WorkflowContext,
};
