//! Percentage-complete value shared by projects and tasks.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole-number completion percentage in `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// No work done.
    pub const ZERO: Self = Self(0);
    /// All work done.
    pub const COMPLETE: Self = Self(100);

    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProgressOutOfRange`] when `value` lies
    /// outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, ProjectDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|percent| *percent <= Self::COMPLETE.0)
            .map(Self)
            .ok_or(ProjectDomainError::ProgressOutOfRange(value))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Integer mean of `values`, rounded down; zero for an empty input.
    #[must_use]
    pub fn mean(values: impl IntoIterator<Item = Self>) -> Self {
        let (sum, count) = values
            .into_iter()
            .fold((0_u64, 0_u64), |(sum, count), progress| {
                (sum + u64::from(progress.0), count + 1)
            });
        let mean = sum.checked_div(count).unwrap_or(0);
        u8::try_from(mean).map_or(Self::COMPLETE, Self)
    }
}

impl TryFrom<i64> for Progress {
    type Error = ProjectDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
