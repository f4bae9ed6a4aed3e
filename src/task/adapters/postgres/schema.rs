//! Diesel schema for task persistence.

diesel::table! {
    /// Task records grouped into board columns.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Board column.
        #[max_length = 50]
        status -> Varchar,
        /// Zero-based rank within the column.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
