//! `PostgreSQL` repository implementation for the activity log.

use super::{
    models::{ActivityRow, NewActivityRow},
    schema::activity_log,
};
use crate::activity::{
    domain::{ActivityAction, ActivityId, ActivityRecord},
    ports::{ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult},
};
use crate::task::adapters::postgres::TaskPgPool;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::Value;

/// `PostgreSQL`-backed activity log.
#[derive(Debug, Clone)]
pub struct PostgresActivityRepository {
    pool: TaskPgPool,
}

impl PostgresActivityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityRepositoryError::persistence)?
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn append(&self, record: &ActivityRecord) -> ActivityRepositoryResult<()> {
        let new_row = to_new_row(record);
        self.run_blocking(move |connection| {
            diesel::insert_into(activity_log::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ActivityRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> ActivityRepositoryResult<Vec<ActivityRecord>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = activity_log::table
                .order(activity_log::created_at.desc())
                .limit(row_limit)
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }
}

fn to_new_row(record: &ActivityRecord) -> NewActivityRow {
    NewActivityRow {
        id: record.id().into_inner(),
        action: record.action().as_str().to_owned(),
        task_id: record.task_id().map(TaskId::into_inner),
        details: Some(record.details().clone()),
        created_at: record.created_at(),
    }
}

fn row_to_record(row: ActivityRow) -> ActivityRepositoryResult<ActivityRecord> {
    let ActivityRow {
        id,
        action: persisted_action,
        task_id,
        details,
        created_at,
    } = row;

    let action = ActivityAction::try_from(persisted_action.as_str())
        .map_err(ActivityRepositoryError::persistence)?;

    Ok(ActivityRecord::from_persisted(
        ActivityId::from_uuid(id),
        action,
        task_id.map(TaskId::from_uuid),
        details.unwrap_or(Value::Null),
        created_at,
    ))
}
