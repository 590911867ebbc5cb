//! Service layer for creating, editing and deleting tasks.

use super::TaskForm;
use crate::identity::{
    domain::{Actor, Role, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::project::{
    domain::{Progress, Project, ProjectId},
    ports::{ProjectStore, ProjectStoreError},
};
use crate::task::{
    domain::{
        Deadline, DeadlineFormat, NewTask, Task, TaskAccess, TaskDescription, TaskDetails,
        TaskEdit, TaskField, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::validation::{FieldErrors, Rejected};
use mockable::Clock;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// The submitted form failed validation; the form is returned unchanged.
    #[error("task form rejected: {}", .0.errors())]
    Validation(Box<Rejected<TaskForm>>),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The acting user may not perform the operation.
    #[error("forbidden")]
    Forbidden,

    /// The request was structurally inconsistent.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project store operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectStoreError),

    /// User directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<T, P, D, C>
where
    T: TaskRepository,
    P: ProjectStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    directory: Arc<D>,
    clock: Arc<C>,
    deadline_format: DeadlineFormat,
}

/// Values shared by the create and edit forms, each present only when it
/// passed validation.
struct CheckedForm {
    name: Option<TaskName>,
    description: Option<TaskDescription>,
    deadline: Option<Deadline>,
    project: Option<Project>,
    developer_id: Option<UserId>,
}

impl<T, P, D, C> TaskWorkflowService<T, P, D, C>
where
    T: TaskRepository,
    P: ProjectStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service reading deadlines in the default
    /// format.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            directory,
            clock,
            deadline_format: DeadlineFormat::default(),
        }
    }

    /// Replaces the format deadlines are read and rendered in.
    #[must_use]
    pub fn with_deadline_format(mut self, format: DeadlineFormat) -> Self {
        self.deadline_format = format;
        self
    }

    /// Returns the format deadlines are read and rendered in.
    #[must_use]
    pub const fn deadline_format(&self) -> &DeadlineFormat {
        &self.deadline_format
    }

    /// Returns the statuses offered by task forms, in workflow order.
    #[must_use]
    pub const fn status_options() -> &'static [TaskStatus] {
        &TaskStatus::ALL
    }

    /// Creates a task from a submitted form.
    ///
    /// The task always starts as [`TaskStatus::New`] with zero progress and
    /// records the project's current manager; form values for status,
    /// progress and manager are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] for developers, users without
    /// a role and managers of other projects, and
    /// [`TaskWorkflowError::Validation`] when any field is invalid. Nothing is
    /// persisted in either case.
    pub async fn create(&self, form: TaskForm, actor: &Actor) -> TaskWorkflowResult<Task> {
        if !actor.role().can_manage() {
            debug!(actor = %actor.user_id(), role = %actor.role(), "task creation denied");
            return Err(TaskWorkflowError::Forbidden);
        }

        let mut errors = FieldErrors::new();
        let checked = self.check_common(&form, None, &mut errors).await?;
        let (Some(name), Some(description), Some(deadline), Some(project)) = (
            checked.name,
            checked.description,
            checked.deadline,
            checked.project,
        ) else {
            return Err(reject(form, errors, "create"));
        };
        if !errors.is_empty() {
            return Err(reject(form, errors, "create"));
        }

        if !TaskAccess::may_create(actor, &project) {
            debug!(
                actor = %actor.user_id(),
                project_id = %project.id(),
                "task creation outside managed project denied"
            );
            return Err(TaskWorkflowError::Forbidden);
        }

        let details = TaskDetails {
            name,
            description,
            deadline,
            developer_id: checked.developer_id,
        };
        let new_task = NewTask::new(details, &project, &*self.clock);
        let task = self.tasks.add(&new_task).await?;
        info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            actor = %actor.user_id(),
            "task created"
        );
        Ok(task)
    }

    /// Applies a submitted form to an existing task.
    ///
    /// `status` and `progress` left empty keep their stored values; every
    /// other field takes the submitted value. Each field that differs from
    /// the stored task must be granted to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task does not exist,
    /// [`TaskWorkflowError::BadRequest`] when the form belongs to another
    /// task, [`TaskWorkflowError::Forbidden`] when the actor has no standing
    /// on the task or a changed field is not granted, and
    /// [`TaskWorkflowError::Validation`] when any field is invalid. Standing
    /// is checked before the form is validated.
    /// The stored task is unchanged in all of these cases.
    pub async fn edit(&self, id: TaskId, form: TaskForm, actor: &Actor) -> TaskWorkflowResult<Task> {
        let mut task = self
            .tasks
            .find(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))?;
        if let Some(form_id) = form.id.filter(|form_id| *form_id != id.value()) {
            return Err(TaskWorkflowError::BadRequest(format!(
                "form for task {form_id} submitted to task {id}"
            )));
        }

        let owning_project = self.projects.find(task.project_id()).await?;
        let access = TaskAccess::resolve(actor, &task, owning_project.as_ref());
        if !access.may_edit() {
            debug!(task_id = %id, actor = %actor.user_id(), "task edit by unrelated user denied");
            return Err(TaskWorkflowError::Forbidden);
        }

        let mut errors = FieldErrors::new();
        let checked = self
            .check_common(&form, task.developer_id(), &mut errors)
            .await?;
        let status = check_status(&form, &mut errors);
        let progress = check_progress(&form, &mut errors);
        let manager_id = match form.selected_manager() {
            Some(raw) => {
                self.assignable_user(raw, task.manager_id(), TaskField::ManagerId, &mut errors)
                    .await?
            }
            None => None,
        };
        let (Some(name), Some(description), Some(deadline), Some(project)) = (
            checked.name,
            checked.description,
            checked.deadline,
            checked.project,
        ) else {
            return Err(reject(form, errors, "edit"));
        };
        if !errors.is_empty() {
            return Err(reject(form, errors, "edit"));
        }

        let edit = TaskEdit {
            name,
            description,
            deadline,
            status: status.unwrap_or(task.status()),
            progress: progress.unwrap_or(task.progress()),
            developer_id: checked.developer_id,
            manager_id,
            project_id: project.id(),
        };

        if let Err(denial) = access.check_edit(&task, &edit) {
            debug!(task_id = %id, actor = %actor.user_id(), %denial, "task edit denied");
            return Err(TaskWorkflowError::Forbidden);
        }

        let changed: Vec<&'static str> = task
            .changed_fields(&edit)
            .into_iter()
            .map(TaskField::as_str)
            .collect();
        if !task.apply(edit, &*self.clock) {
            debug!(task_id = %id, actor = %actor.user_id(), "task edit changed nothing");
            return Ok(task);
        }
        self.tasks.update(&task).await?;
        info!(task_id = %id, actor = %actor.user_id(), fields = ?changed, "task updated");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// Only the task row is removed; its project and users are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when the task does not exist
    /// and [`TaskWorkflowError::Forbidden`] unless the actor is an
    /// administrator or manages the task's project.
    pub async fn delete(&self, id: TaskId, actor: &Actor) -> TaskWorkflowResult<()> {
        let task = self
            .tasks
            .find(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))?;
        let project = self.projects.find(task.project_id()).await?;
        let access = TaskAccess::resolve(actor, &task, project.as_ref());
        if !access.may_delete() {
            debug!(
                task_id = %id,
                actor = %actor.user_id(),
                relation = ?access.relation(),
                "task deletion denied"
            );
            return Err(TaskWorkflowError::Forbidden);
        }

        self.tasks.remove(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskWorkflowError::NotFound(missing),
            other => other.into(),
        })?;
        info!(task_id = %id, actor = %actor.user_id(), "task deleted");
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn find(&self, id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.tasks.find(id).await?)
    }

    /// Lists the tasks the actor may see, ordered by identifier.
    ///
    /// Administrators see every task, project managers the tasks of their
    /// projects and developers the tasks assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] or
    /// [`TaskWorkflowError::Projects`] when lookup fails.
    pub async fn list_visible(&self, actor: &Actor) -> TaskWorkflowResult<Vec<Task>> {
        if actor.role() == Role::Default {
            return Ok(Vec::new());
        }
        let projects: BTreeMap<ProjectId, Project> = self
            .projects
            .all()
            .await?
            .into_iter()
            .map(|project| (project.id(), project))
            .collect();
        let tasks = self.tasks.all().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| {
                TaskAccess::resolve(actor, task, projects.get(&task.project_id())).may_view()
            })
            .collect())
    }

    /// Checks the fields shared by both forms. `stored_developer` is the
    /// developer already on the task, which is accepted without a lookup.
    async fn check_common(
        &self,
        form: &TaskForm,
        stored_developer: Option<&UserId>,
        errors: &mut FieldErrors,
    ) -> TaskWorkflowResult<CheckedForm> {
        let name = record(errors, TaskField::Name, TaskName::new(form.name.as_str()));
        let description = record(
            errors,
            TaskField::Description,
            TaskDescription::new(form.description.as_str()),
        );
        let deadline = record(
            errors,
            TaskField::Deadline,
            Deadline::parse(&form.deadline, &self.deadline_format),
        );
        let project = match form.project_id {
            Some(raw) => {
                let found = self.projects.find(ProjectId::new(raw)).await?;
                if found.is_none() {
                    errors.add(
                        TaskField::ProjectId.as_str(),
                        format!("project {raw} does not exist"),
                    );
                }
                found
            }
            None => {
                errors.add(TaskField::ProjectId.as_str(), "a project must be selected");
                None
            }
        };
        let developer_id = match form.selected_developer() {
            Some(raw) => {
                self.assignable_user(raw, stored_developer, TaskField::DeveloperId, errors)
                    .await?
            }
            None => None,
        };
        Ok(CheckedForm {
            name,
            description,
            deadline,
            project,
            developer_id,
        })
    }

    /// Resolves a submitted user id. Ids equal to `stored` are kept as they
    /// are; users may have left the directory since they were assigned.
    async fn assignable_user(
        &self,
        raw: &str,
        stored: Option<&UserId>,
        field: TaskField,
        errors: &mut FieldErrors,
    ) -> TaskWorkflowResult<Option<UserId>> {
        let Some(id) = record(errors, field, UserId::new(raw)) else {
            return Ok(None);
        };
        if stored == Some(&id) {
            return Ok(Some(id));
        }
        if self.directory.find(&id).await?.is_none() {
            errors.add(field.as_str(), format!("user {id} does not exist"));
            return Ok(None);
        }
        Ok(Some(id))
    }
}

fn check_status(form: &TaskForm, errors: &mut FieldErrors) -> Option<TaskStatus> {
    let raw = form
        .status
        .as_deref()
        .map(str::trim)
        .filter(|status| !status.is_empty())?;
    record(errors, TaskField::Status, TaskStatus::try_from(raw))
}

fn check_progress(form: &TaskForm, errors: &mut FieldErrors) -> Option<Progress> {
    let raw = form.progress?;
    record(errors, TaskField::Progress, Progress::new(raw))
}

fn record<V, E: Display>(
    errors: &mut FieldErrors,
    field: TaskField,
    result: Result<V, E>,
) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field.as_str(), err.to_string());
            None
        }
    }
}

fn reject(form: TaskForm, errors: FieldErrors, operation: &'static str) -> TaskWorkflowError {
    warn!(operation, fields = %errors, "task form rejected");
    TaskWorkflowError::Validation(Box::new(Rejected::new(form, errors)))
}
