//! In-memory task repository for tests and store-less deployments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::activity::adapters::memory::InMemoryActivityRepository;
use crate::task::{
    domain::{PersistedTaskData, Position, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// When linked to an [`InMemoryActivityRepository`], deleting a task also
/// removes its activity records, matching the cascading foreign key of the
/// relational schema.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    activity: Option<InMemoryActivityRepository>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose deletes cascade into `activity`.
    #[must_use]
    pub fn with_activity_log(activity: InMemoryActivityRepository) -> Self {
        Self {
            tasks: Arc::default(),
            activity: Some(activity),
        }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Sorts tasks by position, breaking ties by creation time then identifier.
fn sort_by_position(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        left.position()
            .cmp(&right.position())
            .then_with(|| left.created_at().cmp(&right.created_at()))
            .then_with(|| left.id().into_inner().cmp(&right.id().into_inner()))
    });
}

/// Rebuilds a task with a new column slot.
fn relocate(
    task: &Task,
    status: TaskStatus,
    position: Position,
    updated_at: DateTime<Utc>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        title: task.title().clone(),
        description: task.description().map(str::to_owned),
        status,
        position,
        created_at: task.created_at(),
        updated_at,
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        let existing = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *existing = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let mut all: Vec<Task> = self.read()?.values().cloned().collect();
        sort_by_position(&mut all);
        Ok(all)
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let mut column: Vec<Task> = self
            .read()?
            .values()
            .filter(|task| task.status() == status)
            .cloned()
            .collect();
        sort_by_position(&mut column);
        Ok(column)
    }

    async fn max_position(&self, status: TaskStatus) -> TaskRepositoryResult<Option<Position>> {
        Ok(self
            .read()?
            .values()
            .filter(|task| task.status() == status)
            .map(Task::position)
            .max())
    }

    async fn update_position(&self, id: TaskId, position: Position) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        let existing = tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        *existing = relocate(existing, existing.status(), position, existing.updated_at());
        Ok(())
    }

    async fn update_status_and_position(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: Position,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        let existing = tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        *existing = relocate(existing, status, position, updated_at);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        {
            let mut tasks = self.write()?;
            tasks.remove(&id).ok_or(TaskRepositoryError::NotFound(id))?;
        }
        if let Some(activity) = &self.activity {
            activity
                .remove_for_task(id)
                .map_err(TaskRepositoryError::persistence)?;
        }
        Ok(())
    }
}
