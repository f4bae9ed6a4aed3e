//! Adapter implementations for activity persistence.

pub mod memory;
pub mod postgres;
