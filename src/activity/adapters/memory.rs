//! In-memory activity log for tests and store-less deployments.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::activity::{
    domain::ActivityRecord,
    ports::{ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory activity log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityRepository {
    records: Arc<RwLock<Vec<ActivityRecord>>>,
}

impl InMemoryActivityRepository {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every record that references `task_id`.
    ///
    /// Mirrors the cascading foreign key of the relational schema.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn remove_for_task(&self, task_id: TaskId) -> ActivityRepositoryResult<()> {
        let mut records = self.records.write().map_err(|err| {
            ActivityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        records.retain(|record| record.task_id() != Some(task_id));
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn append(&self, record: &ActivityRecord) -> ActivityRepositoryResult<()> {
        let mut records = self.records.write().map_err(|err| {
            ActivityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        records.push(record.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> ActivityRepositoryResult<Vec<ActivityRecord>> {
        let records = self.records.read().map_err(|err| {
            ActivityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        // Reverse insertion order first so equal timestamps stay newest-first
        // after the stable sort.
        let mut newest_first: Vec<ActivityRecord> = records.iter().rev().cloned().collect();
        newest_first.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        newest_first.truncate(limit);
        Ok(newest_first)
    }
}
