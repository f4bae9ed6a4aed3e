//! Best-effort activity recording.

use crate::activity::{
    domain::{ActivityAction, ActivityRecord},
    ports::ActivityRepository,
};
use crate::task::domain::TaskId;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;

/// Fire-and-forget writer for the activity log.
///
/// Append failures are logged and swallowed so auditing can never fail the
/// task operation that triggered it.
#[derive(Clone)]
pub struct ActivityRecorder<A, C>
where
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> ActivityRecorder<A, C>
where
    A: ActivityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a recorder writing to `repository`.
    #[must_use]
    pub const fn new(repository: Arc<A>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends an activity record, logging instead of returning failures.
    pub async fn record(&self, action: ActivityAction, task_id: Option<TaskId>, details: Value) {
        let record = ActivityRecord::new(action, task_id, details, &*self.clock);
        if let Err(err) = self.repository.append(&record).await {
            tracing::warn!(
                action = %action,
                task_id = ?task_id,
                error = %err,
                "failed to append activity record"
            );
        }
    }

    /// Returns up to `limit` records, newest first.
    ///
    /// A failed read is logged and yields an empty log.
    pub async fn recent(&self, limit: usize) -> Vec<ActivityRecord> {
        match self.repository.recent(limit).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(limit, error = %err, "failed to read activity log");
                Vec::new()
            }
        }
    }
}
