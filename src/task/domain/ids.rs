//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
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

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// Zero-based rank of a task within its column.
///
/// Positions are non-negative and bounded by the `PostgreSQL` `INTEGER`
/// column that stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// The first slot of every column.
    pub const ZERO: Self = Self(0);

    /// Largest position representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u32 = i32::MAX.unsigned_abs();

    /// Creates a validated position from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPosition`] when the value is
    /// negative or exceeds the schema-backed maximum (`i32::MAX`).
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        u32::try_from(value)
            .ok()
            .filter(|candidate| *candidate <= Self::MAX_PERSISTED_VALUE)
            .map(Self)
            .ok_or(TaskDomainError::InvalidPosition(value))
    }

    /// Creates a position from a zero-based index within a column listing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPosition`] when the index does not
    /// fit the persisted range.
    pub fn from_index(index: usize) -> Result<Self, TaskDomainError> {
        let value = i64::try_from(index).unwrap_or(i64::MAX);
        Self::new(value)
    }

    /// Returns the slot directly after this one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPosition`] when the column is full.
    pub fn next(self) -> Result<Self, TaskDomainError> {
        Self::new(i64::from(self.0) + 1)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
