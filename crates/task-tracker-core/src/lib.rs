//! Domain types for the task tracker: tasks, ids, statuses and filters.

/// In-memory view of the whole task file.
pub mod collection;
/// Validation errors.
pub mod error;
/// List query filters.
pub mod filter;
/// Identifier types.
pub mod id;
/// Task status values.
pub mod status;

pub use crate::collection::{CollectionError, TaskCollection};
pub use crate::error::ValidationError;
pub use crate::filter::TaskFilter;
pub use crate::id::TaskId;
pub use crate::status::Status;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single trackable unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, unique within the store.
    pub id: TaskId,
    /// Sanitized, non-blank description.
    pub description: String,
    /// Current status.
    pub status: Status,
    /// Creation time. Never changes.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Time of the most recent mutation.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Task {
    /// Create a `todo` task stamped with `now`.
    #[must_use]
    pub const fn new(id: TaskId, description: String, now: OffsetDateTime) -> Self {
        Self {
            id,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the description and refresh `updated_at`.
    pub fn set_description(&mut self, description: String, now: OffsetDateTime) {
        self.description = description;
        self.touch(now);
    }

    /// Replace the status and refresh `updated_at`.
    pub fn set_status(&mut self, status: Status, now: OffsetDateTime) {
        self.status = status;
        self.touch(now);
    }

    // Clamped so a clock stepping backwards cannot put updated_at before created_at.
    fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now.max(self.created_at);
    }
}

/// Strip backslashes and double quotes, turn tabs and line breaks into
/// spaces, drop other control characters, then trim.
///
/// # Errors
/// Returns [`ValidationError::EmptyDescription`] when nothing is left.
pub fn sanitize_description(raw: &str) -> Result<String, ValidationError> {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '\\' | '"' => None,
            c if c.is_control() && c.is_whitespace() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_owned())
}
