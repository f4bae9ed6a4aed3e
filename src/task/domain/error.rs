//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {length} characters, expected at most {max}")]
    TitleTooLong {
        /// Character count of the rejected title.
        length: usize,
        /// Maximum accepted character count.
        max: usize,
    },

    /// The status is not one of the board columns.
    #[error("invalid status '{0}', expected one of todo, inprogress, done")]
    InvalidStatus(String),

    /// The position is negative or does not fit the persisted range.
    #[error("invalid position {0}, expected a non-negative integer")]
    InvalidPosition(i64),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl From<ParseTaskStatusError> for TaskDomainError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}
