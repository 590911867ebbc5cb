//! Diesel row models for the user directory.

use super::schema::{user_roles, users};
use diesel::prelude::*;

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
}

/// Insert model for role assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_roles)]
pub struct NewUserRoleRow {
    /// Assigned user.
    pub user_id: String,
    /// Assigned role.
    pub role_id: i32,
}
