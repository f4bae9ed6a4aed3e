//! Activity record value types.

use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Creates a new random activity identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an activity identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of task mutation an activity record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// A task was created.
    TaskCreated,
    /// A task changed column.
    TaskMoved,
    /// A task was deleted.
    TaskDeleted,
}

impl ActivityAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "task_created",
            Self::TaskMoved => "task_moved",
            Self::TaskDeleted => "task_deleted",
        }
    }
}

impl TryFrom<&str> for ActivityAction {
    type Error = ParseActivityActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "task_created" => Ok(Self::TaskCreated),
            "task_moved" => Ok(Self::TaskMoved),
            "task_deleted" => Ok(Self::TaskDeleted),
            _ => Err(ParseActivityActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing activity actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity action: {0}")]
pub struct ParseActivityActionError(pub String);

/// Immutable audit entry describing one task mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    id: ActivityId,
    action: ActivityAction,
    task_id: Option<TaskId>,
    details: Value,
    created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates a record stamped with the current clock time.
    #[must_use]
    pub fn new(
        action: ActivityAction,
        task_id: Option<TaskId>,
        details: Value,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            action,
            task_id,
            details,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ActivityId,
        action: ActivityAction,
        task_id: Option<TaskId>,
        details: Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            action,
            task_id,
            details,
            created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the referenced task, if the record still links to one.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the free-form detail payload.
    #[must_use]
    pub const fn details(&self) -> &Value {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
