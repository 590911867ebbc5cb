//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyName,

    /// The task name exceeds the storage limit.
    #[error("task name exceeds 200 character limit")]
    NameTooLong,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The deadline is not a calendar date in the expected format.
    #[error("deadline '{value}' is not a valid date in the format {format}")]
    InvalidDeadline {
        /// Submitted deadline text.
        value: String,
        /// Expected `strftime` pattern.
        format: String,
    },

    /// The configured deadline pattern cannot render and re-read a date.
    #[error("deadline format '{0}' cannot represent a calendar date")]
    InvalidDeadlineFormat(String),
}

/// Error returned while parsing task statuses from forms or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
