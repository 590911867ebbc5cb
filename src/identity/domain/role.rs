//! Closed set of roles a directory user can hold.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to a user through the role-assignment relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control over every project, task and user.
    Admin,
    /// Owns projects and the tasks inside them.
    ProjectManager,
    /// Works on tasks assigned to them.
    Developer,
    /// Registered without a working role; may only read.
    Default,
}

impl Role {
    /// Every role, in drop-down order.
    pub const ALL: [Self; 4] = [
        Self::Admin,
        Self::ProjectManager,
        Self::Developer,
        Self::Default,
    ];

    /// Returns the canonical role name stored in the role relation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ProjectManager => "Project Manager",
            Self::Developer => "Developer",
            Self::Default => "Default",
        }
    }

    /// Resolves the role of a user from the raw assignment value.
    ///
    /// Users without an assignment, or with a role name this crate does not
    /// know, are treated as [`Role::Default`].
    #[must_use]
    pub fn from_assignment(value: Option<&str>) -> Self {
        value
            .and_then(|name| Self::try_from(name).ok())
            .unwrap_or(Self::Default)
    }

    /// Returns `true` for roles allowed to own projects and create tasks.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Admin | Self::ProjectManager)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "projectmanager" => Ok(Self::ProjectManager),
            "developer" => Ok(Self::Developer),
            "default" => Ok(Self::Default),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
