//! Diesel row models for activity persistence.

use super::schema::activity_log;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for activity records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activity_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Activity record identifier.
    pub id: uuid::Uuid,
    /// Action tag.
    pub action: String,
    /// Referenced task identifier.
    pub task_id: Option<uuid::Uuid>,
    /// Detail payload.
    pub details: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for activity records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_log)]
pub struct NewActivityRow {
    /// Activity record identifier.
    pub id: uuid::Uuid,
    /// Action tag.
    pub action: String,
    /// Referenced task identifier.
    pub task_id: Option<uuid::Uuid>,
    /// Detail payload.
    pub details: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
