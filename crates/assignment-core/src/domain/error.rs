//! Error taxonomy for the assignment workflow.
//!
//! Read-side failures (`FetchError`) are recoverable: the screen falls back to
//! canonical data and carries the message as a non-blocking warning.
//! `CommitError` is the only failure the student has to act on.

use assignment_gateway::GatewayError;

/// The payload had the wrong top-level shape for the requested entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("expected a list of {kind} records, got {found}")]
    NotAList {
        kind: &'static str,
        found: &'static str,
    },

    #[error("expected a {kind} object, got {found}")]
    NotAnObject {
        kind: &'static str,
        found: &'static str,
    },

    #[error("expected a {kind} object at position {index}, got {found}")]
    ElementNotAnObject {
        kind: &'static str,
        index: usize,
        found: &'static str,
    },

    #[error("malformed {kind} record: {reason}")]
    Malformed { kind: &'static str, reason: String },

    #[error("service returned no {kind} records")]
    Empty { kind: &'static str },
}

/// Why a screen is showing fallback data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transient(#[from] GatewayError),

    #[error("{0}")]
    Normalization(#[from] NormalizationError),
}

/// The assignment registration did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("assignment could not be registered: {0}")]
pub struct CommitError(#[from] pub GatewayError);

/// Invalid user action for the current screen state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("screen is still loading")]
    NotReady,

    #[error("no {kind} with id {id}")]
    UnknownRecord { kind: &'static str, id: String },

    #[error("{count} {kind} records share id {id}; refusing to pick one")]
    AmbiguousId {
        kind: &'static str,
        id: String,
        count: usize,
    },

    #[error("selection is locked while the assignment is {status}")]
    SelectionLocked { status: &'static str },
}

/// Result type for workflow actions.
pub type Result<T> = std::result::Result<T, WorkflowError>;
