//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks tied to a project, a developer and a manager.
    tasks (id) {
        /// Repository-assigned identifier.
        id -> Int4,
        /// Task name.
        #[max_length = 200]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Calendar deadline.
        deadline -> Date,
        /// Completion percentage.
        progress -> Int2,
        /// Owning project.
        project_id -> Int4,
        /// Assigned developer, if any.
        #[max_length = 450]
        developer_id -> Nullable<Varchar>,
        /// Manager captured when the task was created, if any.
        #[max_length = 450]
        manager_id -> Nullable<Varchar>,
        /// Mirrors `developer_id IS NOT NULL`.
        is_developer_assigned -> Bool,
        /// Mirrors `manager_id IS NOT NULL`.
        is_manager_assigned -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
