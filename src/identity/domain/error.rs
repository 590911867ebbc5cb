//! Error types for identity validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The user identifier exceeds the storage limit.
    #[error("user identifier exceeds 450 character limit: {0}")]
    UserIdTooLong(String),

    /// The user's given name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,
}

/// Error returned while parsing a role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
