//! Directory port for user lookup and role assignment.

use crate::identity::domain::{Role, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find(&self, id: &UserId) -> UserDirectoryResult<Option<User>>;

    /// Returns the raw role name assigned to the user, if any.
    ///
    /// The value is the stored role string; callers resolve it with
    /// [`Role::from_assignment`].
    async fn role_of(&self, id: &UserId) -> UserDirectoryResult<Option<String>>;

    /// Returns every user ordered by identifier.
    async fn all(&self) -> UserDirectoryResult<Vec<User>>;

    /// Adds a user together with their initial role assignment.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] when the identifier is
    /// already taken.
    async fn add(&self, user: &User, role: Role) -> UserDirectoryResult<()>;

    /// Replaces every role assignment of the user with `role`.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when the user does not exist.
    async fn assign_role(&self, id: &UserId, role: Role) -> UserDirectoryResult<()>;

    /// Removes the user and their role assignments.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when the user does not exist.
    async fn remove(&self, id: &UserId) -> UserDirectoryResult<()>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
