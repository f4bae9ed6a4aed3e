//! Diesel schema for the activity log.

diesel::table! {
    /// Append-only audit trail of task mutations.
    activity_log (id) {
        /// Activity record identifier.
        id -> Uuid,
        /// Action tag such as `task_moved`.
        #[max_length = 100]
        action -> Varchar,
        /// Referenced task; rows are removed when the task is deleted.
        task_id -> Nullable<Uuid>,
        /// Free-form detail payload.
        details -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
