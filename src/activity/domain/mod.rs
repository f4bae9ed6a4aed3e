//! Domain model for activity records.

mod record;

pub use record::{ActivityAction, ActivityId, ActivityRecord, ParseActivityActionError};
