//! Repository port for the append-only activity log.

use crate::activity::domain::ActivityRecord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity repository operations.
pub type ActivityRepositoryResult<T> = Result<T, ActivityRepositoryError>;

/// Activity log persistence contract.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Appends a record to the log.
    async fn append(&self, record: &ActivityRecord) -> ActivityRepositoryResult<()>;

    /// Returns at most `limit` records, newest first.
    async fn recent(&self, limit: usize) -> ActivityRepositoryResult<Vec<ActivityRecord>>;
}

/// Errors returned by activity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
