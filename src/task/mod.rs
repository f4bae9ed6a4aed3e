//! Task board columns and position bookkeeping.
//!
//! Tasks live in three fixed columns (`todo`, `inprogress`, `done`) and are
//! ordered within each column by a dense, zero-based position. Appends,
//! moves and deletes keep every column at positions `0..k-1`. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
