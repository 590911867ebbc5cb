//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i32,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Deadline.
    pub deadline: NaiveDate,
    /// Completion percentage.
    pub progress: i16,
    /// Owning project.
    pub project_id: i32,
    /// Assigned developer.
    pub developer_id: Option<String>,
    /// Recorded manager.
    pub manager_id: Option<String>,
    /// Developer assignment flag.
    pub is_developer_assigned: bool,
    /// Manager assignment flag.
    pub is_manager_assigned: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Initial status.
    pub status: String,
    /// Deadline.
    pub deadline: NaiveDate,
    /// Initial progress.
    pub progress: i16,
    /// Owning project.
    pub project_id: i32,
    /// Assigned developer.
    pub developer_id: Option<String>,
    /// Manager captured from the project.
    pub manager_id: Option<String>,
    /// Developer assignment flag.
    pub is_developer_assigned: bool,
    /// Manager assignment flag.
    pub is_manager_assigned: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
