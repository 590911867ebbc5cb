//! Diesel schema for project persistence.

diesel::table! {
    /// Projects owned by a project manager.
    projects (id) {
        /// Store-assigned identifier.
        id -> Int4,
        /// Project name.
        #[max_length = 200]
        name -> Varchar,
        /// Progress aggregated from the project's tasks.
        progress -> Int2,
        /// Owning project manager (weak reference into `users`).
        #[max_length = 450]
        project_manager_id -> Varchar,
    }
}
