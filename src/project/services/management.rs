//! Service layer for creating, editing, deleting and aggregating projects.

use crate::identity::{
    domain::{Actor, Role, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::project::{
    domain::{NewProject, Project, ProjectId, ProjectName},
    ports::{ProjectStore, ProjectStoreError},
};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::validation::{FieldErrors, Rejected};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Form key of the project name.
const NAME_FIELD: &str = "name";
/// Form key of the project manager selection.
const MANAGER_FIELD: &str = "project_manager_id";

/// Raw project form as submitted by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectForm {
    /// Project name.
    pub name: String,
    /// Selected project manager. Only administrators choose one; a project
    /// manager always manages the projects they create.
    pub project_manager_id: Option<String>,
}

impl ProjectForm {
    /// Creates a form with a name and no manager selection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_manager_id: None,
        }
    }

    /// Selects the project manager.
    #[must_use]
    pub fn with_manager(mut self, manager_id: impl Into<String>) -> Self {
        self.project_manager_id = Some(manager_id.into());
        self
    }

    fn selected_manager(&self) -> Option<&str> {
        self.project_manager_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// The submitted form failed validation; the form is returned unchanged.
    #[error("project form rejected: {}", .0.errors())]
    Validation(Box<Rejected<ProjectForm>>),

    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The acting user may not perform the operation.
    #[error("forbidden")]
    Forbidden,

    /// Project store operation failed.
    #[error(transparent)]
    Store(#[from] ProjectStoreError),

    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// User directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, T, D>
where
    P: ProjectStore,
    T: TaskRepository,
    D: UserDirectory,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    directory: Arc<D>,
}

impl<P, T, D> ProjectService<P, T, D>
where
    P: ProjectStore,
    T: TaskRepository,
    D: UserDirectory,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, directory: Arc<D>) -> Self {
        Self {
            projects,
            tasks,
            directory,
        }
    }

    /// Creates a project with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Forbidden`] for developers and users
    /// without a role, and [`ProjectServiceError::Validation`] when the name
    /// is blank or an administrator selects no existing manager.
    pub async fn create(&self, form: ProjectForm, actor: &Actor) -> ProjectServiceResult<Project> {
        if !actor.role().can_manage() {
            debug!(actor = %actor.user_id(), role = %actor.role(), "project creation denied");
            return Err(ProjectServiceError::Forbidden);
        }

        let mut errors = FieldErrors::new();
        let name = check_name(&form, &mut errors);
        let manager_id = if actor.role() == Role::ProjectManager {
            Some(actor.user_id().clone())
        } else {
            self.check_manager(&form, &mut errors).await?
        };
        let (Some(valid_name), Some(valid_manager)) = (name, manager_id) else {
            return Err(reject(form, errors, "create"));
        };
        if !errors.is_empty() {
            return Err(reject(form, errors, "create"));
        }

        let project = self
            .projects
            .add(&NewProject::new(valid_name, valid_manager))
            .await?;
        info!(
            project_id = %project.id(),
            manager = %project.manager_id(),
            actor = %actor.user_id(),
            "project created"
        );
        Ok(project)
    }

    /// Renames a project and, for administrators, hands it to another
    /// manager. Tasks keep the manager they were created with.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, [`ProjectServiceError::Forbidden`] unless the actor is an
    /// administrator or the project's manager (who may not hand it over), and
    /// [`ProjectServiceError::Validation`] for invalid fields.
    pub async fn edit(
        &self,
        id: ProjectId,
        form: ProjectForm,
        actor: &Actor,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.require(id).await?;
        if !may_manage(actor, &project) {
            debug!(project_id = %id, actor = %actor.user_id(), "project edit denied");
            return Err(ProjectServiceError::Forbidden);
        }

        let mut errors = FieldErrors::new();
        let name = check_name(&form, &mut errors);
        let manager_id = if actor.is_admin() {
            self.check_manager(&form, &mut errors).await?
        } else {
            let handover = form
                .selected_manager()
                .is_some_and(|selected| selected != actor.user_id().as_str());
            if handover {
                debug!(project_id = %id, actor = %actor.user_id(), "project handover denied");
                return Err(ProjectServiceError::Forbidden);
            }
            Some(project.manager_id().clone())
        };
        let (Some(valid_name), Some(valid_manager)) = (name, manager_id) else {
            return Err(reject(form, errors, "edit"));
        };
        if !errors.is_empty() {
            return Err(reject(form, errors, "edit"));
        }

        project.rename(valid_name);
        project.reassign_manager(valid_manager);
        self.projects.update(&project).await?;
        info!(project_id = %id, actor = %actor.user_id(), "project updated");
        Ok(project)
    }

    /// Deletes a project together with its tasks.
    ///
    /// The tasks go in a single repository call before the project row. If
    /// removing the project then fails, the project remains without tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist and [`ProjectServiceError::Forbidden`] unless the actor is an
    /// administrator or the project's manager.
    pub async fn delete(&self, id: ProjectId, actor: &Actor) -> ProjectServiceResult<()> {
        let project = self.require(id).await?;
        if !may_manage(actor, &project) {
            debug!(project_id = %id, actor = %actor.user_id(), "project deletion denied");
            return Err(ProjectServiceError::Forbidden);
        }

        let removed_tasks = self.tasks.remove_for_project(id).await?;
        self.projects.remove(id).await?;
        info!(
            project_id = %id,
            removed_tasks,
            actor = %actor.user_id(),
            "project deleted"
        );
        Ok(())
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when lookup fails.
    pub async fn find(&self, id: ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.projects.find(id).await?)
    }

    /// Lists every project ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when lookup fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.all().await?)
    }

    /// Lists the projects managed by `manager_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when lookup fails.
    pub async fn managed_by(&self, manager_id: &UserId) -> ProjectServiceResult<Vec<Project>> {
        let projects = self.projects.all().await?;
        Ok(projects
            .into_iter()
            .filter(|project| project.is_managed_by(manager_id))
            .collect())
    }

    /// Sets the project's progress to the mean progress of its tasks,
    /// rounded down, or zero when it has none.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn recalculate_progress(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        let mut project = self.require(id).await?;
        let tasks = self.tasks.for_project(id).await?;
        if project.aggregate_progress(tasks.iter().map(Task::progress)) {
            self.projects.update(&project).await?;
            info!(project_id = %id, progress = %project.progress(), "project progress recalculated");
        }
        Ok(project)
    }

    async fn require(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    async fn check_manager(
        &self,
        form: &ProjectForm,
        errors: &mut FieldErrors,
    ) -> ProjectServiceResult<Option<UserId>> {
        let Some(raw) = form.selected_manager() else {
            errors.add(MANAGER_FIELD, "Please select a Project Manager.");
            return Ok(None);
        };
        let id = match UserId::new(raw) {
            Ok(id) => id,
            Err(err) => {
                errors.add(MANAGER_FIELD, err.to_string());
                return Ok(None);
            }
        };
        if self.directory.find(&id).await?.is_none() {
            errors.add(MANAGER_FIELD, format!("user {id} does not exist"));
            return Ok(None);
        }
        Ok(Some(id))
    }
}

fn may_manage(actor: &Actor, project: &Project) -> bool {
    match actor.role() {
        Role::Admin => true,
        Role::ProjectManager => project.is_managed_by(actor.user_id()),
        Role::Developer | Role::Default => false,
    }
}

fn check_name(form: &ProjectForm, errors: &mut FieldErrors) -> Option<ProjectName> {
    match ProjectName::new(form.name.as_str()) {
        Ok(name) => Some(name),
        Err(err) => {
            errors.add(NAME_FIELD, err.to_string());
            None
        }
    }
}

fn reject(form: ProjectForm, errors: FieldErrors, operation: &'static str) -> ProjectServiceError {
    warn!(operation, fields = %errors, "project form rejected");
    ProjectServiceError::Validation(Box::new(Rejected::new(form, errors)))
}
