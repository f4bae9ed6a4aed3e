//! Append-only activity log for task mutations.
//!
//! Activity records are observational: they are written alongside task
//! creation, cross-column moves and deletions, and never read by the board
//! logic. Writes are best-effort and a failed append never fails the task
//! operation that triggered it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Recording service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
