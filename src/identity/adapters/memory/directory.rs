//! In-memory user directory for tests and local wiring.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: BTreeMap<UserId, User>,
    // Mirrors the user-to-role relation: stores role names, not `Role` values.
    user_roles: BTreeMap<UserId, String>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw role name for a user, bypassing role validation.
    ///
    /// Lets tests reproduce assignments written by other systems, such as
    /// role names this crate does not recognise.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Persistence`] when the lock is poisoned.
    pub fn assign_raw_role(&self, id: &UserId, role_name: &str) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.user_roles.insert(id.clone(), role_name.to_owned());
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, id: &UserId) -> UserDirectoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(id).cloned())
    }

    async fn role_of(&self, id: &UserId) -> UserDirectoryResult<Option<String>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.user_roles.get(id).cloned())
    }

    async fn all(&self) -> UserDirectoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.values().cloned().collect())
    }

    async fn add(&self, user: &User, role: Role) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.users.contains_key(user.id()) {
            return Err(UserDirectoryError::DuplicateUser(user.id().clone()));
        }
        state.users.insert(user.id().clone(), user.clone());
        state
            .user_roles
            .insert(user.id().clone(), role.as_str().to_owned());
        Ok(())
    }

    async fn assign_role(&self, id: &UserId, role: Role) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.users.contains_key(id) {
            return Err(UserDirectoryError::NotFound(id.clone()));
        }
        state.user_roles.insert(id.clone(), role.as_str().to_owned());
        Ok(())
    }

    async fn remove(&self, id: &UserId) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .users
            .remove(id)
            .ok_or_else(|| UserDirectoryError::NotFound(id.clone()))?;
        state.user_roles.remove(id);
        Ok(())
    }
}
