//! Service layer for user listings, actor resolution and role assignment.

use crate::identity::{
    domain::{Actor, Role, User, UserId, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryServiceError {
    /// The call was structurally invalid, e.g. a required value was blank.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The requested role name is not a known role.
    #[error("role not found: {0}")]
    RoleNotFound(String),

    /// The acting user may not perform the operation.
    #[error("forbidden")]
    Forbidden,

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for user directory service operations.
pub type UserDirectoryServiceResult<T> = Result<T, UserDirectoryServiceError>;

/// User directory orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> UserDirectoryService<D>
where
    D: UserDirectory,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolves the acting user for a request from the provider's user id.
    ///
    /// Users without a role assignment act as [`Role::Default`].
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::BadRequest`] when the identifier
    /// is blank, or [`UserDirectoryServiceError::Directory`] when the role
    /// lookup fails.
    pub async fn resolve_actor(&self, user_id: &str) -> UserDirectoryServiceResult<Actor> {
        let id = parse_user_id(user_id)?;
        let role_name = self.directory.role_of(&id).await?;
        Ok(Actor::new(id, Role::from_assignment(role_name.as_deref())))
    }

    /// Registers a user, assigning [`Role::Default`] when no role is given.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Directory`] when the identifier is
    /// already taken or persistence fails.
    pub async fn register(
        &self,
        user: User,
        role: Option<Role>,
    ) -> UserDirectoryServiceResult<UserProfile> {
        let assigned = role.unwrap_or(Role::Default);
        self.directory.add(&user, assigned).await?;
        info!(user_id = %user.id(), role = %assigned, "user registered");
        Ok(UserProfile {
            user,
            role: assigned,
        })
    }

    /// Finds a user and resolves their role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Directory`] when lookup fails.
    pub async fn find(&self, id: &UserId) -> UserDirectoryServiceResult<Option<UserProfile>> {
        let Some(user) = self.directory.find(id).await? else {
            return Ok(None);
        };
        Ok(Some(self.profile(user).await?))
    }

    /// Lists every user with their resolved role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Directory`] when lookup fails.
    pub async fn list_users(&self) -> UserDirectoryServiceResult<Vec<UserProfile>> {
        let users = self.directory.all().await?;
        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(self.profile(user).await?);
        }
        Ok(profiles)
    }

    /// Lists users holding the Developer role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Directory`] when lookup fails.
    pub async fn developers(&self) -> UserDirectoryServiceResult<Vec<User>> {
        self.users_with_role(Role::Developer).await
    }

    /// Lists users holding the Project Manager role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Directory`] when lookup fails.
    pub async fn managers(&self) -> UserDirectoryServiceResult<Vec<User>> {
        self.users_with_role(Role::ProjectManager).await
    }

    /// Replaces the role of a user. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Forbidden`] for non-admin actors,
    /// [`UserDirectoryServiceError::BadRequest`] when the role name is blank,
    /// [`UserDirectoryServiceError::RoleNotFound`] for an unknown role name
    /// and [`UserDirectoryServiceError::UserNotFound`] when the user does not
    /// exist.
    pub async fn change_role(
        &self,
        user_id: &str,
        role_name: &str,
        actor: &Actor,
    ) -> UserDirectoryServiceResult<UserProfile> {
        require_admin(actor, "change_role")?;
        let id = parse_user_id(user_id)?;
        let Some(user) = self.directory.find(&id).await? else {
            return Err(UserDirectoryServiceError::UserNotFound(id));
        };
        if role_name.trim().is_empty() {
            return Err(UserDirectoryServiceError::BadRequest(
                "role name is required".to_owned(),
            ));
        }
        let role = Role::try_from(role_name)
            .map_err(|err| UserDirectoryServiceError::RoleNotFound(err.0))?;

        self.directory
            .assign_role(&id, role)
            .await
            .map_err(|err| user_not_found(err, &id))?;
        info!(user_id = %id, %role, actor = %actor.user_id(), "user role changed");
        Ok(UserProfile { user, role })
    }

    /// Removes a user. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryServiceError::Forbidden`] for non-admin actors
    /// and [`UserDirectoryServiceError::UserNotFound`] when the user does not
    /// exist.
    pub async fn remove_user(&self, user_id: &str, actor: &Actor) -> UserDirectoryServiceResult<()> {
        require_admin(actor, "remove_user")?;
        let id = parse_user_id(user_id)?;
        self.directory
            .remove(&id)
            .await
            .map_err(|err| user_not_found(err, &id))?;
        info!(user_id = %id, actor = %actor.user_id(), "user removed");
        Ok(())
    }

    async fn profile(&self, user: User) -> UserDirectoryServiceResult<UserProfile> {
        let role_name = self.directory.role_of(user.id()).await?;
        Ok(UserProfile {
            user,
            role: Role::from_assignment(role_name.as_deref()),
        })
    }

    async fn users_with_role(&self, role: Role) -> UserDirectoryServiceResult<Vec<User>> {
        let profiles = self.list_users().await?;
        Ok(profiles
            .into_iter()
            .filter(|profile| profile.role == role)
            .map(|profile| profile.user)
            .collect())
    }
}

fn parse_user_id(value: &str) -> UserDirectoryServiceResult<UserId> {
    UserId::new(value)
        .map_err(|err| UserDirectoryServiceError::BadRequest(format!("invalid user id: {err}")))
}

fn require_admin(actor: &Actor, operation: &'static str) -> UserDirectoryServiceResult<()> {
    if actor.is_admin() {
        return Ok(());
    }
    debug!(actor = %actor.user_id(), role = %actor.role(), operation, "directory operation denied");
    Err(UserDirectoryServiceError::Forbidden)
}

fn user_not_found(err: UserDirectoryError, id: &UserId) -> UserDirectoryServiceError {
    match err {
        UserDirectoryError::NotFound(_) => UserDirectoryServiceError::UserNotFound(id.clone()),
        other => other.into(),
    }
}
