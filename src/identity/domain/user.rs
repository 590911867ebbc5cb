//! Directory user record.

use super::{IdentityDomainError, Role, UserId};
use serde::{Deserialize, Serialize};

/// A user known to the directory.
///
/// The record carries no role: roles live in a separate
/// assignment relation and are resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    surname: String,
}

impl User {
    /// Creates a user record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when `name` is blank.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        let given = name.into();
        let trimmed = given.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            surname: surname.into().trim().to_owned(),
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the family name.
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Returns `"name surname"`, or just the name when no surname is known.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.surname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.surname)
        }
    }
}

/// A user together with their resolved role, as shown in user listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Directory record.
    pub user: User,
    /// Role resolved through the assignment relation.
    pub role: Role,
}
