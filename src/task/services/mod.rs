//! Application services for the task board.
//!
//! [`ColumnPositionManager`] owns the position bookkeeping of each column;
//! [`TaskBoardService`] wraps it with task creation, lookup and editing.

mod board;
mod error;
mod positions;

pub use board::{CreateTaskRequest, DEFAULT_ACTIVITY_LIMIT, TaskBoardService, UpdateTaskRequest};
pub use error::{TaskBoardError, TaskBoardResult};
pub use positions::{ColumnPositionManager, MoveTaskRequest};
