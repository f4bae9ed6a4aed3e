//! Domain model for the task board.
//!
//! Tasks are grouped into three fixed columns by [`TaskStatus`] and ordered
//! inside each column by a dense, zero-based [`Position`]. The domain keeps
//! all infrastructure concerns outside of its boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{Position, TaskId};
pub use status::TaskStatus;
pub use task::{
    MAX_TITLE_LENGTH, PersistedTaskData, Task, TaskDetailsUpdate, TaskTitle,
    normalize_description,
};
