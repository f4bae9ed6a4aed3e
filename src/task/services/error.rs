//! Error taxonomy for task board services.

use crate::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Service-level errors for task board operations.
///
/// Callers branch on the variant; the underlying store failure is kept as the
/// error source of [`TaskBoardError::Persistence`].
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Input validation failed before any store call.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The column already holds a task at the highest storable position,
    /// so nothing can be appended to it.
    #[error("column {0} has no free position")]
    ColumnFull(TaskStatus),

    /// The underlying store rejected or failed an operation.
    #[error("task operation failed")]
    Persistence(#[source] TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskBoardError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other),
        }
    }
}

/// Result type for task board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Logs a failed operation with its context.
///
/// Store failures are logged at `error`; validation and lookup failures are
/// expected outcomes and only logged at `debug`.
pub(crate) fn log_failure(operation: &'static str, task_id: Option<TaskId>, err: &TaskBoardError) {
    match err {
        TaskBoardError::Persistence(source) => {
            tracing::error!(operation, task_id = ?task_id, error = %source, "task operation failed");
        }
        TaskBoardError::Domain(_)
        | TaskBoardError::NotFound(_)
        | TaskBoardError::ColumnFull(_) => {
            tracing::debug!(operation, task_id = ?task_id, error = %err, "task operation rejected");
        }
    }
}
