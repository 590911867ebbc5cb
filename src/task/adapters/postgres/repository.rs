//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::identity::domain::UserId;
use crate::persistence::PgPool;
use crate::project::domain::{Progress, ProjectId};
use crate::task::{
    domain::{
        Deadline, ManagerSnapshot, NewTask, PersistedTaskData, Task, TaskDescription, TaskId,
        TaskName, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn add(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_row(task);
        let id = task.id();
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(row.id))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn remove_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::project_id.eq(project_id.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .order(tasks::id)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .order(tasks::id)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    let developer_id = task.developer_id().map(|id| id.as_str().to_owned());
    NewTaskRow {
        name: task.name().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline().date(),
        progress: i16::from(task.progress().value()),
        project_id: task.project_id().value(),
        is_developer_assigned: developer_id.is_some(),
        developer_id,
        manager_id: Some(task.manager().user_id().as_str().to_owned()),
        is_manager_assigned: true,
        created_at: task.created_at(),
        updated_at: task.created_at(),
    }
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().value(),
        name: task.name().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline().date(),
        progress: i16::from(task.progress().value()),
        project_id: task.project_id().value(),
        developer_id: task.developer_id().map(|id| id.as_str().to_owned()),
        manager_id: task.manager_id().map(|id| id.as_str().to_owned()),
        is_developer_assigned: task.is_developer_assigned(),
        is_manager_assigned: task.is_manager_assigned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        description,
        status,
        deadline,
        progress,
        project_id,
        developer_id,
        manager_id,
        is_developer_assigned: _,
        is_manager_assigned: _,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        name: TaskName::new(name).map_err(TaskRepositoryError::persistence)?,
        description: TaskDescription::new(description).map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        deadline: Deadline::new(deadline),
        progress: Progress::new(i64::from(progress)).map_err(TaskRepositoryError::persistence)?,
        project_id: ProjectId::new(project_id),
        developer_id: developer_id
            .map(UserId::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        manager: manager_id
            .map(UserId::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?
            .map(ManagerSnapshot::assigned),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

#[cfg(test)]
mod tests {
    //! Row conversion tests; no database required.

    use super::{TaskRow, row_to_task, to_row};
    use crate::task::{
        domain::{TaskId, TaskStatus},
        ports::TaskRepositoryError,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> TaskRow {
        let created = Utc
            .with_ymd_and_hms(2024, 1, 2, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        TaskRow {
            id: 3,
            name: "Task 3".to_owned(),
            description: "Wire up invoices".to_owned(),
            status: "InProgress".to_owned(),
            deadline: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            progress: 25,
            project_id: 1,
            developer_id: Some("dev-1".to_owned()),
            manager_id: None,
            is_developer_assigned: true,
            is_manager_assigned: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[rstest]
    fn row_round_trips_through_domain(row: TaskRow) {
        let task = row_to_task(row).expect("valid row");

        assert_eq!(task.id(), TaskId::new(3));
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.progress().value(), 25);
        assert!(task.is_developer_assigned());
        assert!(!task.is_manager_assigned());

        let back = to_row(&task);
        assert_eq!(back.developer_id.as_deref(), Some("dev-1"));
        assert_eq!(back.manager_id, None);
        assert!(back.is_developer_assigned);
        assert!(!back.is_manager_assigned);
        assert_eq!(back.status, "InProgress");
    }

    #[rstest]
    fn unknown_status_is_a_persistence_error(mut row: TaskRow) {
        row.status = "Archived".to_owned();
        assert!(matches!(
            row_to_task(row),
            Err(TaskRepositoryError::Persistence(_))
        ));
    }

    #[rstest]
    fn blank_description_is_a_persistence_error(mut row: TaskRow) {
        row.description = "   ".to_owned();
        assert!(matches!(
            row_to_task(row),
            Err(TaskRepositoryError::Persistence(_))
        ));
    }
}
