//! Validation errors raised for caller-supplied data.

use thiserror::Error;

/// Input that violates a task invariant. Never corrupts stored state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Description is blank after sanitization.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// Status value is not one of the known statuses.
    #[error("unknown status '{0}' (expected todo, in-progress or done)")]
    UnknownStatus(String),

    /// Filter value is neither `all` nor a known status.
    #[error("unknown filter '{0}' (expected all, todo, in-progress or done)")]
    UnknownFilter(String),

    /// Task id is not a positive integer.
    #[error("invalid task id '{0}' (expected a positive integer)")]
    InvalidId(String),
}
