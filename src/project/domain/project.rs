//! Project aggregate.

use super::{Progress, ProjectDomainError, ProjectId};
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum project name length, matching the `VARCHAR(200)` column.
const MAX_NAME_LENGTH: usize = 200;

/// Validated, trimmed project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the value is blank or
    /// [`ProjectDomainError::NameTooLong`] when it exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ProjectDomainError::NameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project waiting to be inserted; the store assigns its identifier.
///
/// New projects always start at zero progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: ProjectName,
    manager_id: UserId,
}

impl NewProject {
    /// Creates an unpersisted project owned by `manager_id`.
    #[must_use]
    pub const fn new(name: ProjectName, manager_id: UserId) -> Self {
        Self { name, manager_id }
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the owning project manager.
    #[must_use]
    pub const fn manager_id(&self) -> &UserId {
        &self.manager_id
    }

    /// Returns the initial progress, always zero.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        Progress::ZERO
    }

    /// Completes the project with the identifier assigned by the store.
    #[must_use]
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            progress: Progress::ZERO,
            manager_id: self.manager_id,
        }
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    progress: Progress,
    manager_id: UserId,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted aggregated progress.
    pub progress: Progress,
    /// Persisted project manager.
    pub manager_id: UserId,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            progress: data.progress,
            manager_id: data.manager_id,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the aggregated progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the owning project manager.
    #[must_use]
    pub const fn manager_id(&self) -> &UserId {
        &self.manager_id
    }

    /// Returns `true` when `user_id` manages this project.
    #[must_use]
    pub fn is_managed_by(&self, user_id: &UserId) -> bool {
        self.manager_id == *user_id
    }

    /// Renames the project.
    pub fn rename(&mut self, name: ProjectName) {
        self.name = name;
    }

    /// Hands the project to another manager.
    ///
    /// Tasks keep the manager they were created with.
    pub fn reassign_manager(&mut self, manager_id: UserId) {
        self.manager_id = manager_id;
    }

    /// Replaces the progress with the aggregate of the given task progress.
    ///
    /// Returns `true` when the stored value changed.
    pub fn aggregate_progress(&mut self, task_progress: impl IntoIterator<Item = Progress>) -> bool {
        let aggregated = Progress::mean(task_progress);
        let changed = aggregated != self.progress;
        self.progress = aggregated;
        changed
    }
}
