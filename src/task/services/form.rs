//! Submitted task form.

use crate::task::domain::{DeadlineFormat, Task};
use serde::{Deserialize, Serialize};

/// Raw task form as submitted by the presentation layer.
///
/// Values are kept exactly as entered so a rejected form can be shown again
/// unchanged. Blank identifier strings count as "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    /// Identifier of the task being edited, if the form carries one.
    pub id: Option<i32>,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Deadline text in the configured deadline format.
    pub deadline: String,
    /// Owning project.
    pub project_id: Option<i32>,
    /// Developer to assign.
    pub developer_id: Option<String>,
    /// Manager to record. Ignored on create.
    pub manager_id: Option<String>,
    /// Status name. Ignored on create; `None` keeps the stored status.
    pub status: Option<String>,
    /// Progress percentage. Ignored on create; `None` keeps the stored value.
    pub progress: Option<i64>,
}

impl TaskForm {
    /// Creates a form with the required text fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            deadline: deadline.into(),
            ..Self::default()
        }
    }

    /// Prefills a form with the current values of `task`.
    #[must_use]
    pub fn from_task(task: &Task, format: &DeadlineFormat) -> Self {
        Self {
            id: Some(task.id().value()),
            name: task.name().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            deadline: task.deadline().format(format),
            project_id: Some(task.project_id().value()),
            developer_id: task.developer_id().map(|id| id.as_str().to_owned()),
            manager_id: task.manager_id().map(|id| id.as_str().to_owned()),
            status: Some(task.status().as_str().to_owned()),
            progress: Some(i64::from(task.progress().value())),
        }
    }

    /// Sets the task identifier.
    #[must_use]
    pub const fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub const fn with_project(mut self, project_id: i32) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the developer to assign.
    #[must_use]
    pub fn with_developer(mut self, developer_id: impl Into<String>) -> Self {
        self.developer_id = Some(developer_id.into());
        self
    }

    /// Clears the developer.
    #[must_use]
    pub fn without_developer(mut self) -> Self {
        self.developer_id = None;
        self
    }

    /// Sets the manager to record.
    #[must_use]
    pub fn with_manager(mut self, manager_id: impl Into<String>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    /// Sets the status name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the progress percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the task name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the deadline text.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    pub(super) fn selected_developer(&self) -> Option<&str> {
        selected(self.developer_id.as_deref())
    }

    pub(super) fn selected_manager(&self) -> Option<&str> {
        selected(self.manager_id.as_deref())
    }
}

fn selected(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|id| !id.is_empty())
}
