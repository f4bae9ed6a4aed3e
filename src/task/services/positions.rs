//! Column position management.
//!
//! Every column keeps its tasks at dense positions `0..k-1`. Appends take
//! the slot after the current maximum, cross-column moves append to the
//! target column and close the gap left behind, and deletes close the gap
//! of the removed task.
//!
//! # Consistency
//!
//! None of the multi-step sequences here run in a store transaction. A
//! failure between the primary write and the reindex writes leaves a gap or
//! a duplicate in the affected column until the next reindex of that column
//! renormalizes it. Concurrent operations on one column race in the same
//! way: two appends can read the same maximum and take the same slot.

use super::error::{TaskBoardError, TaskBoardResult, log_failure};
use crate::activity::{domain::ActivityAction, ports::ActivityRepository, services::ActivityRecorder};
use crate::task::{
    domain::{Position, Task, TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepository,
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;

/// Request payload for moving a task within or across columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    status: String,
    position: i64,
}

impl MoveTaskRequest {
    /// Creates a move request from raw caller input.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>, position: i64) -> Self {
        Self {
            task_id,
            status: status.into(),
            position,
        }
    }

    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Keeps task positions dense within each column.
#[derive(Clone)]
pub struct ColumnPositionManager<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    recorder: ActivityRecorder<A, C>,
    clock: Arc<C>,
}

impl<R, A, C> ColumnPositionManager<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a position manager over the given store and activity log.
    #[must_use]
    pub const fn new(repository: Arc<R>, recorder: ActivityRecorder<A, C>, clock: Arc<C>) -> Self {
        Self {
            repository,
            recorder,
            clock,
        }
    }

    /// Returns the position a new task appended to `status` should take.
    ///
    /// An empty column yields [`Position::ZERO`]. Nothing is written; the
    /// caller persists the new task with the returned position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::ColumnFull`] when the column's highest
    /// position is already the largest storable one, and
    /// [`TaskBoardError::Persistence`] when the store read fails.
    pub async fn append_position(&self, status: TaskStatus) -> TaskBoardResult<Position> {
        match self.repository.max_position(status).await? {
            None => Ok(Position::ZERO),
            Some(highest) => highest
                .next()
                .map_err(|_| TaskBoardError::ColumnFull(status)),
        }
    }

    /// Moves a task within its column or to another column.
    ///
    /// Within one column the task takes the requested position verbatim and
    /// its siblings are renumbered around it, so a position that does not fit
    /// the gap leaves a duplicate or a hole. Across columns the requested
    /// position is ignored: the task is appended to the target column, the
    /// source column is reindexed and a `task_moved` activity is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown status or a negative
    /// position, [`TaskBoardError::NotFound`] for an unknown task and
    /// [`TaskBoardError::Persistence`] when a store call fails. A cross-column
    /// move into a column with no position left gives
    /// [`TaskBoardError::ColumnFull`] before anything is written.
    pub async fn move_task(&self, request: MoveTaskRequest) -> TaskBoardResult<Task> {
        let task_id = request.task_id;
        self.move_task_unlogged(request)
            .await
            .inspect_err(|err| log_failure("move_task", Some(task_id), err))
    }

    async fn move_task_unlogged(&self, request: MoveTaskRequest) -> TaskBoardResult<Task> {
        let MoveTaskRequest {
            task_id,
            status,
            position,
        } = request;
        let new_status =
            TaskStatus::try_from(status.as_str()).map_err(TaskDomainError::from)?;
        let requested = Position::new(position)?;

        let task = self.load(task_id).await?;
        let old_status = task.status();

        if old_status == new_status {
            self.repository.update_position(task_id, requested).await?;
            self.reindex_column(new_status, Some(task_id)).await?;
            tracing::info!(
                task_id = %task_id,
                status = %new_status,
                position = %requested,
                "reordered task within column"
            );
        } else {
            let target = self.append_position(new_status).await?;
            self.repository
                .update_status_and_position(task_id, new_status, target, self.clock.utc())
                .await?;
            self.reindex_column(old_status, None).await?;
            tracing::info!(
                task_id = %task_id,
                from = %old_status,
                to = %new_status,
                position = %target,
                "moved task across columns"
            );
            self.recorder
                .record(
                    ActivityAction::TaskMoved,
                    Some(task_id),
                    json!({ "from": old_status, "to": new_status }),
                )
                .await;
        }

        self.load(task_id).await
    }

    /// Deletes a task and closes the gap in its former column.
    ///
    /// Records a `task_deleted` activity. The record carries the task id in
    /// its details rather than as a reference, since references to a deleted
    /// task are removed with it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] for an unknown task and
    /// [`TaskBoardError::Persistence`] when a store call fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskBoardResult<()> {
        self.delete_task_unlogged(task_id)
            .await
            .inspect_err(|err| log_failure("delete_task", Some(task_id), err))
    }

    async fn delete_task_unlogged(&self, task_id: TaskId) -> TaskBoardResult<()> {
        let task = self.load(task_id).await?;
        self.repository.delete(task_id).await?;
        self.reindex_column(task.status(), None).await?;
        tracing::info!(task_id = %task_id, status = %task.status(), "deleted task");
        self.recorder
            .record(
                ActivityAction::TaskDeleted,
                None,
                json!({ "title": task.title().as_str(), "task_id": task_id }),
            )
            .await;
        Ok(())
    }

    /// Renumbers a column to `0..k-1` in ascending existing-position order.
    ///
    /// `exclude` is left out of the renumbering and keeps whatever position
    /// it holds. Only changed positions are written, so reindexing a dense
    /// column writes nothing. Returns the number of positions rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Persistence`] when a store call fails.
    /// Writes made before the failure are not rolled back.
    pub async fn reindex_column(
        &self,
        status: TaskStatus,
        exclude: Option<TaskId>,
    ) -> TaskBoardResult<usize> {
        let column = self.repository.find_by_status(status).await?;
        let mut rewritten = 0;
        for (index, task) in column
            .iter()
            .filter(|task| Some(task.id()) != exclude)
            .enumerate()
        {
            let target = Position::from_index(index)?;
            if task.position() != target {
                self.repository.update_position(task.id(), target).await?;
                rewritten += 1;
            }
        }
        tracing::debug!(status = %status, rewritten, "reindexed column");
        Ok(rewritten)
    }

    async fn load(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBoardError::NotFound(task_id))
    }
}
