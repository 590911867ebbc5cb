//! Store port for project persistence.

use crate::project::domain::{NewProject, Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project store operations.
pub type ProjectStoreResult<T> = Result<T, ProjectStoreError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find(&self, id: ProjectId) -> ProjectStoreResult<Option<Project>>;

    /// Returns every project ordered by identifier.
    async fn all(&self) -> ProjectStoreResult<Vec<Project>>;

    /// Inserts a project and returns it with its assigned identifier.
    async fn add(&self, project: &NewProject) -> ProjectStoreResult<Project>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::NotFound`] when the project does not exist.
    async fn update(&self, project: &Project) -> ProjectStoreResult<()>;

    /// Removes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::NotFound`] when the project does not exist.
    async fn remove(&self, id: ProjectId) -> ProjectStoreResult<()>;
}

/// Errors returned by project store implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectStoreError {
    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
