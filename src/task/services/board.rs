//! Application service behind the task board HTTP surface.

use super::error::{TaskBoardError, TaskBoardResult, log_failure};
use super::positions::{ColumnPositionManager, MoveTaskRequest};
use crate::activity::{
    domain::{ActivityAction, ActivityRecord},
    ports::ActivityRepository,
    services::ActivityRecorder,
};
use crate::task::{
    domain::{Task, TaskDetailsUpdate, TaskDomainError, TaskId, TaskStatus, TaskTitle},
    ports::TaskRepository,
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;

/// Number of activity records returned when the caller gives no limit.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 50;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the column the task is created in. Defaults to `todo`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for editing a task's title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description. A blank value clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Task board orchestration service.
///
/// Position bookkeeping is delegated to [`ColumnPositionManager`]; see its
/// module documentation for the consistency caveats of multi-step writes.
#[derive(Clone)]
pub struct TaskBoardService<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    recorder: ActivityRecorder<A, C>,
    positions: ColumnPositionManager<R, A, C>,
}

impl<R, A, C> TaskBoardService<R, A, C>
where
    R: TaskRepository,
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service.
    #[must_use]
    pub fn new(repository: Arc<R>, activity: Arc<A>, clock: Arc<C>) -> Self {
        let positions = ColumnPositionManager::new(
            Arc::clone(&repository),
            ActivityRecorder::new(Arc::clone(&activity), Arc::clone(&clock)),
            Arc::clone(&clock),
        );
        let recorder = ActivityRecorder::new(activity, Arc::clone(&clock));
        Self {
            repository,
            clock,
            recorder,
            positions,
        }
    }

    /// Returns the column position manager used by this service.
    #[must_use]
    pub const fn positions(&self) -> &ColumnPositionManager<R, A, C> {
        &self.positions
    }

    /// Creates a task at the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] when the title or status is invalid,
    /// [`TaskBoardError::ColumnFull`] when the column has no position left
    /// and [`TaskBoardError::Persistence`] when the store fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskBoardResult<Task> {
        self.create_task_unlogged(request)
            .await
            .inspect_err(|err| log_failure("create_task", None, err))
    }

    async fn create_task_unlogged(&self, request: CreateTaskRequest) -> TaskBoardResult<Task> {
        let title = TaskTitle::new(&request.title)?;
        let status = request
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or_default();

        let position = self.positions.append_position(status).await?;
        let task = Task::new(title, request.description, status, position, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            status = %status,
            position = %position,
            "created task"
        );

        self.recorder
            .record(
                ActivityAction::TaskCreated,
                Some(task.id()),
                json!({ "title": task.title().as_str(), "status": status }),
            )
            .await;
        Ok(task)
    }

    /// Lists tasks ordered by position, optionally limited to one column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown status filter and
    /// [`TaskBoardError::Persistence`] when the store read fails.
    pub async fn list_tasks(&self, status: Option<&str>) -> TaskBoardResult<Vec<Task>> {
        let result: TaskBoardResult<Vec<Task>> = match status.map(parse_status).transpose() {
            Ok(Some(column)) => self.repository.find_by_status(column).await.map_err(Into::into),
            Ok(None) => self.repository.find_all().await.map_err(Into::into),
            Err(err) => Err(err),
        };
        result.inspect_err(|err| log_failure("list_tasks", None, err))
    }

    /// Returns a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] for an unknown task and
    /// [`TaskBoardError::Persistence`] when the store read fails.
    pub async fn get_task(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        let result: TaskBoardResult<Task> = match self.repository.find_by_id(task_id).await {
            Ok(Some(task)) => Ok(task),
            Ok(None) => Err(TaskBoardError::NotFound(task_id)),
            Err(err) => Err(err.into()),
        };
        result.inspect_err(|err| log_failure("get_task", Some(task_id), err))
    }

    /// Edits a task's title and/or description.
    ///
    /// Status and position are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for a blank title,
    /// [`TaskBoardError::NotFound`] for an unknown task and
    /// [`TaskBoardError::Persistence`] when the store fails.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskBoardResult<Task> {
        let task_id = request.task_id;
        self.update_task_unlogged(request)
            .await
            .inspect_err(|err| log_failure("update_task", Some(task_id), err))
    }

    async fn update_task_unlogged(&self, request: UpdateTaskRequest) -> TaskBoardResult<Task> {
        let UpdateTaskRequest {
            task_id,
            title,
            description,
        } = request;
        let update = TaskDetailsUpdate {
            title: title.map(TaskTitle::new).transpose()?,
            description,
        };

        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBoardError::NotFound(task_id))?;
        task.apply_details(update, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %task_id, "updated task details");
        Ok(task)
    }

    /// Moves a task; see [`ColumnPositionManager::move_task`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`ColumnPositionManager::move_task`].
    pub async fn move_task(&self, request: MoveTaskRequest) -> TaskBoardResult<Task> {
        self.positions.move_task(request).await
    }

    /// Deletes a task; see [`ColumnPositionManager::delete_task`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`ColumnPositionManager::delete_task`].
    pub async fn delete_task(&self, task_id: TaskId) -> TaskBoardResult<()> {
        self.positions.delete_task(task_id).await
    }

    /// Returns up to `limit` activity records, newest first.
    ///
    /// The activity log is best-effort: a failed read yields an empty list.
    pub async fn activity_log(&self, limit: usize) -> Vec<ActivityRecord> {
        self.recorder.recent(limit).await
    }
}

fn parse_status(value: &str) -> TaskBoardResult<TaskStatus> {
    TaskStatus::try_from(value)
        .map_err(TaskDomainError::from)
        .map_err(TaskBoardError::from)
}
