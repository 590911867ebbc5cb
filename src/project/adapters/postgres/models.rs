//! Diesel row models for project persistence.

use super::schema::projects;
use diesel::prelude::*;

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: i32,
    /// Project name.
    pub name: String,
    /// Aggregated progress.
    pub progress: i16,
    /// Owning project manager.
    pub project_manager_id: String,
}

/// Insert model for projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project name.
    pub name: String,
    /// Initial progress.
    pub progress: i16,
    /// Owning project manager.
    pub project_manager_id: String,
}
