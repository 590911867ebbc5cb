//! Task deadlines and the textual format they are submitted in.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Pattern used when none is configured.
const DEFAULT_PATTERN: &str = "%d.%m.%Y";

/// Validated `strftime` pattern used to read and render deadlines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeadlineFormat(String);

impl DeadlineFormat {
    /// Creates a deadline format after checking that it can render a date
    /// and read the rendering back.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadlineFormat`] when the pattern is
    /// malformed or loses information (for example a pattern without a
    /// year).
    pub fn new(pattern: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = pattern.into();
        let invalid = || TaskDomainError::InvalidDeadlineFormat(raw.clone());
        let sample = NaiveDate::from_ymd_opt(2024, 12, 31).ok_or_else(invalid)?;

        let mut rendered = String::new();
        write!(rendered, "{}", sample.format(&raw)).map_err(|_| invalid())?;
        let reparsed = NaiveDate::parse_from_str(&rendered, &raw).map_err(|_| invalid())?;
        if reparsed != sample {
            return Err(invalid());
        }
        Ok(Self(raw))
    }

    /// Returns the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeadlineFormat {
    fn default() -> Self {
        Self(DEFAULT_PATTERN.to_owned())
    }
}

impl fmt::Display for DeadlineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar date by which a task should be finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(NaiveDate);

impl Deadline {
    /// Wraps an already valid date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses submitted deadline text.
    ///
    /// Surrounding whitespace is ignored. Dates that do not exist, such as
    /// `31.02.2024`, are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadline`] when `raw` is not a real
    /// calendar date in `format`.
    pub fn parse(raw: &str, format: &DeadlineFormat) -> Result<Self, TaskDomainError> {
        NaiveDate::parse_from_str(raw.trim(), format.as_str())
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidDeadline {
                value: raw.to_owned(),
                format: format.as_str().to_owned(),
            })
    }

    /// Returns the date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Renders the deadline in `format`.
    #[must_use]
    pub fn format(self, format: &DeadlineFormat) -> String {
        let mut rendered = String::new();
        if write!(rendered, "{}", self.0.format(format.as_str())).is_err() {
            rendered = self.0.to_string();
        }
        rendered
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
