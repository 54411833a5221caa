use std::{fmt, str::FromStr};

use crate::Task;
use crate::error::ValidationError;
use crate::status::Status;

/// Selection applied by list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Only tasks currently in the given status.
    Status(Status),
}

impl TaskFilter {
    /// Whether the task passes the filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status == status,
        }
    }
}

impl From<Status> for TaskFilter {
    fn from(status: Status) -> Self {
        Self::Status(status)
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Status(status) => status.fmt(f),
        }
    }
}

impl FromStr for TaskFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Status>()
            .map(Self::Status)
            .map_err(|_| ValidationError::UnknownFilter(s.to_owned()))
    }
}
