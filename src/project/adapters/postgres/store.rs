//! `PostgreSQL` project store implementation.

use super::{
    models::{NewProjectRow, ProjectRow},
    schema::projects,
};
use crate::identity::domain::UserId;
use crate::persistence::PgPool;
use crate::project::{
    domain::{NewProject, PersistedProjectData, Progress, Project, ProjectId, ProjectName},
    ports::{ProjectStore, ProjectStoreError, ProjectStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed project store.
#[derive(Debug, Clone)]
pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectStoreError::persistence)?
    }
}

#[async_trait]
impl ProjectStore for PostgresProjectStore {
    async fn find(&self, id: ProjectId) -> ProjectStoreResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectStoreError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn all(&self) -> ProjectStoreResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            projects::table
                .order(projects::id)
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectStoreError::persistence)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }

    async fn add(&self, project: &NewProject) -> ProjectStoreResult<Project> {
        let new_row = to_new_row(project);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(ProjectStoreError::persistence)?;
            row_to_project(row)
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectStoreResult<()> {
        let row = to_row(project);
        let id = project.id();
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(row.id))
                .set(&row)
                .execute(connection)
                .map_err(ProjectStoreError::persistence)?;
            if updated == 0 {
                return Err(ProjectStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: ProjectId) -> ProjectStoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.find(id.value()))
                .execute(connection)
                .map_err(ProjectStoreError::persistence)?;
            if deleted == 0 {
                return Err(ProjectStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(project: &NewProject) -> NewProjectRow {
    NewProjectRow {
        name: project.name().as_str().to_owned(),
        progress: i16::from(project.progress().value()),
        project_manager_id: project.manager_id().as_str().to_owned(),
    }
}

fn to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().value(),
        name: project.name().as_str().to_owned(),
        progress: i16::from(project.progress().value()),
        project_manager_id: project.manager_id().as_str().to_owned(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectStoreResult<Project> {
    let ProjectRow {
        id,
        name,
        progress,
        project_manager_id,
    } = row;

    let data = PersistedProjectData {
        id: ProjectId::new(id),
        name: ProjectName::new(name).map_err(ProjectStoreError::persistence)?,
        progress: Progress::new(i64::from(progress)).map_err(ProjectStoreError::persistence)?,
        manager_id: UserId::new(project_manager_id).map_err(ProjectStoreError::persistence)?,
    };
    Ok(Project::from_persisted(data))
}
