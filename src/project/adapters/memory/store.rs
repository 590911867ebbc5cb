//! In-memory project store for tests and local wiring.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{NewProject, Project, ProjectId},
    ports::{ProjectStore, ProjectStoreError, ProjectStoreResult},
};

/// Thread-safe in-memory project store with sequential identifiers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: BTreeMap<ProjectId, Project>,
    last_id: i32,
}

impl InMemoryProjectStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn find(&self, id: ProjectId) -> ProjectStoreResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn all(&self) -> ProjectStoreResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.projects.values().cloned().collect())
    }

    async fn add(&self, project: &NewProject) -> ProjectStoreResult<Project> {
        let mut state = self.state.write().map_err(|err| {
            ProjectStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let next = state.last_id.checked_add(1).ok_or_else(|| {
            ProjectStoreError::persistence(std::io::Error::other("project id space exhausted"))
        })?;
        state.last_id = next;

        let stored = project.clone().into_project(ProjectId::new(next));
        state.projects.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> ProjectStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let slot = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectStoreError::NotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn remove(&self, id: ProjectId) -> ProjectStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or(ProjectStoreError::NotFound(id))
    }
}
