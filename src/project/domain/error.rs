//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project name exceeds the storage limit.
    #[error("project name exceeds 200 character limit: {0}")]
    NameTooLong(String),

    /// A progress value lies outside `0..=100`.
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(i64),
}
