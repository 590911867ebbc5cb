//! Task aggregate root and the values it is built from.

use super::{Deadline, TaskDomainError, TaskId, TaskStatus};
use crate::identity::domain::UserId;
use crate::project::domain::{Progress, Project, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum task name length, matching the `VARCHAR(200)` column.
const MAX_NAME_LENGTH: usize = 200;

/// Validated, trimmed task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] when the value is blank or
    /// [`TaskDomainError::NameTooLong`] when it exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(TaskDomainError::NameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, trimmed task description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Manager recorded on a task.
///
/// Copied from the project when the task is created and never re-resolved:
/// handing the project to another manager leaves existing tasks untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerSnapshot(UserId);

impl ManagerSnapshot {
    /// Captures the current manager of `project`.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self(project.manager_id().clone())
    }

    /// Records an explicitly chosen manager.
    #[must_use]
    pub const fn assigned(user_id: UserId) -> Self {
        Self(user_id)
    }

    /// Returns the recorded manager.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Form fields a task edit can touch.
///
/// Also used as the key of field-level validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task name.
    Name,
    /// Task description.
    Description,
    /// Task deadline.
    Deadline,
    /// Workflow status.
    Status,
    /// Completion percentage.
    Progress,
    /// Assigned developer.
    DeveloperId,
    /// Recorded manager.
    ManagerId,
    /// Owning project.
    ProjectId,
}

impl TaskField {
    /// Every editable field in form order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Description,
        Self::Deadline,
        Self::Status,
        Self::Progress,
        Self::DeveloperId,
        Self::ManagerId,
        Self::ProjectId,
    ];

    /// Returns the form key of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Deadline => "deadline",
            Self::Status => "status",
            Self::Progress => "progress",
            Self::DeveloperId => "developer_id",
            Self::ManagerId => "manager_id",
            Self::ProjectId => "project_id",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated user-supplied values of a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// Task name.
    pub name: TaskName,
    /// Task description.
    pub description: TaskDescription,
    /// Task deadline.
    pub deadline: Deadline,
    /// Developer to assign, if any.
    pub developer_id: Option<UserId>,
}

/// Task waiting to be inserted; the repository assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    details: TaskDetails,
    project_id: ProjectId,
    manager: ManagerSnapshot,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Prepares a task in `project`.
    ///
    /// The task starts as [`TaskStatus::New`] with zero progress and records
    /// the project's current manager.
    #[must_use]
    pub fn new(details: TaskDetails, project: &Project, clock: &impl Clock) -> Self {
        Self {
            details,
            project_id: project.id(),
            manager: ManagerSnapshot::from_project(project),
            created_at: clock.utc(),
        }
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.details.name
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.details.description
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.details.deadline
    }

    /// Returns the initial status, always [`TaskStatus::New`].
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        TaskStatus::New
    }

    /// Returns the initial progress, always zero.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        Progress::ZERO
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the developer to assign, if any.
    #[must_use]
    pub const fn developer_id(&self) -> Option<&UserId> {
        self.details.developer_id.as_ref()
    }

    /// Returns the manager captured from the project.
    #[must_use]
    pub const fn manager(&self) -> &ManagerSnapshot {
        &self.manager
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completes the task with the identifier assigned by the repository.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            name: self.details.name,
            description: self.details.description,
            status: TaskStatus::New,
            deadline: self.details.deadline,
            progress: Progress::ZERO,
            project_id: self.project_id,
            developer_id: self.details.developer_id,
            manager: Some(self.manager),
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Full set of values a task should hold after an edit.
///
/// Fields are compared against the stored task to work out what actually
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Wanted name.
    pub name: TaskName,
    /// Wanted description.
    pub description: TaskDescription,
    /// Wanted deadline.
    pub deadline: Deadline,
    /// Wanted status.
    pub status: TaskStatus,
    /// Wanted progress.
    pub progress: Progress,
    /// Wanted developer; `None` unassigns.
    pub developer_id: Option<UserId>,
    /// Wanted manager; `None` unassigns.
    pub manager_id: Option<UserId>,
    /// Wanted project.
    pub project_id: ProjectId,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    description: TaskDescription,
    status: TaskStatus,
    deadline: Deadline,
    progress: Progress,
    project_id: ProjectId,
    developer_id: Option<UserId>,
    manager: Option<ManagerSnapshot>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline.
    pub deadline: Deadline,
    /// Persisted progress.
    pub progress: Progress,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted developer, if any.
    pub developer_id: Option<UserId>,
    /// Persisted manager, if any.
    pub manager: Option<ManagerSnapshot>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            progress: data.progress,
            project_id: data.project_id,
            developer_id: data.developer_id,
            manager: data.manager,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned developer, if any.
    #[must_use]
    pub const fn developer_id(&self) -> Option<&UserId> {
        self.developer_id.as_ref()
    }

    /// Returns the recorded manager, if any.
    #[must_use]
    pub fn manager_id(&self) -> Option<&UserId> {
        self.manager.as_ref().map(ManagerSnapshot::user_id)
    }

    /// Returns `true` when a developer is assigned.
    #[must_use]
    pub const fn is_developer_assigned(&self) -> bool {
        self.developer_id.is_some()
    }

    /// Returns `true` when a manager is recorded.
    #[must_use]
    pub const fn is_manager_assigned(&self) -> bool {
        self.manager.is_some()
    }

    /// Returns `true` when `user_id` is the assigned developer.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.developer_id.as_ref() == Some(user_id)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Lists the fields whose value differs between the task and `edit`,
    /// in form order.
    #[must_use]
    pub fn changed_fields(&self, edit: &TaskEdit) -> Vec<TaskField> {
        TaskField::ALL
            .into_iter()
            .filter(|field| self.differs(*field, edit))
            .collect()
    }

    fn differs(&self, field: TaskField, edit: &TaskEdit) -> bool {
        match field {
            TaskField::Name => self.name != edit.name,
            TaskField::Description => self.description != edit.description,
            TaskField::Deadline => self.deadline != edit.deadline,
            TaskField::Status => self.status != edit.status,
            TaskField::Progress => self.progress != edit.progress,
            TaskField::DeveloperId => self.developer_id != edit.developer_id,
            TaskField::ManagerId => self.manager_id() != edit.manager_id.as_ref(),
            TaskField::ProjectId => self.project_id != edit.project_id,
        }
    }

    /// Applies `edit` to the task.
    ///
    /// Returns `true` when any field changed; the modification timestamp is
    /// only touched in that case.
    pub fn apply(&mut self, edit: TaskEdit, clock: &impl Clock) -> bool {
        if self.changed_fields(&edit).is_empty() {
            return false;
        }
        self.name = edit.name;
        self.description = edit.description;
        self.deadline = edit.deadline;
        self.status = edit.status;
        self.progress = edit.progress;
        self.developer_id = edit.developer_id;
        self.manager = edit.manager_id.map(ManagerSnapshot::assigned);
        self.project_id = edit.project_id;
        self.updated_at = clock.utc();
        true
    }
}
