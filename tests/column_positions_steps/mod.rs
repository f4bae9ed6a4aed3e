//! Step definitions for column position scenarios.

pub mod given;
pub mod when;
