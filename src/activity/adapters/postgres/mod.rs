//! `PostgreSQL` adapters for activity persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresActivityRepository;
