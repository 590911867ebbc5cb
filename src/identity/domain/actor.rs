//! The acting user of a single request.

use super::{Role, UserId};

/// Identity and role of the user performing an operation.
///
/// Supplied per request by the identity provider and only ever read by the
/// services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the actor is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns `true` when `user_id` identifies this actor.
    #[must_use]
    pub fn is(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}
