//! Taskboard: a Kanban task board backend.
//!
//! This crate persists tasks in three fixed columns, keeps their positions
//! dense as tasks are appended, moved and deleted, records an append-only
//! activity log, and serves the board over a JSON HTTP API.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records and column position management
//! - [`activity`]: Best-effort audit trail of task mutations
//! - [`api`]: HTTP routing and response envelopes
//! - [`config`]: Layered server configuration

pub mod activity;
pub mod api;
pub mod config;
pub mod task;
