//! Port contracts for activity persistence.

pub mod repository;

pub use repository::{ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult};
