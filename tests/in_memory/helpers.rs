//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, Role, User, UserId},
    services::UserDirectoryService,
};
use taskboard::project::{adapters::memory::InMemoryProjectStore, services::ProjectService};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{TaskForm, TaskWorkflowService},
};

/// Task workflow wired to in-memory adapters.
pub type Tasks = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryProjectStore,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Project service wired to in-memory adapters.
pub type Projects =
    ProjectService<InMemoryProjectStore, InMemoryTaskRepository, InMemoryUserDirectory>;

/// Every service of the crate sharing one set of in-memory adapters.
pub struct Board {
    pub users: UserDirectoryService<InMemoryUserDirectory>,
    pub projects: Projects,
    pub tasks: Tasks,
    pub directory: Arc<InMemoryUserDirectory>,
    pub task_store: Arc<InMemoryTaskRepository>,
}

impl Board {
    /// Resolves the acting user through the directory, as a request would.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is blank or lookup fails.
    pub async fn actor(&self, id: &str) -> Result<Actor, eyre::Report> {
        Ok(self.users.resolve_actor(id).await?)
    }
}

/// Provides empty adapters and the services over them, with the users
/// `admin`, `pm-1`, `pm-2`, `dev-1`, `dev-2` and `guest` registered.
#[fixture]
pub async fn board() -> Board {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let project_store = Arc::new(InMemoryProjectStore::new());
    let task_store = Arc::new(InMemoryTaskRepository::new());

    let users = UserDirectoryService::new(Arc::clone(&directory));
    for (id, name, role) in [
        ("admin", "Ada", Some(Role::Admin)),
        ("pm-1", "Pat", Some(Role::ProjectManager)),
        ("pm-2", "Quinn", Some(Role::ProjectManager)),
        ("dev-1", "Dana", Some(Role::Developer)),
        ("dev-2", "Eli", Some(Role::Developer)),
        ("guest", "Gus", None),
    ] {
        let user = User::new(UserId::new(id).expect("valid id"), name, "Tester")
            .expect("valid user");
        users.register(user, role).await.expect("register user");
    }

    let projects = ProjectService::new(
        Arc::clone(&project_store),
        Arc::clone(&task_store),
        Arc::clone(&directory),
    );
    let tasks = TaskWorkflowService::new(
        Arc::clone(&task_store),
        project_store,
        Arc::clone(&directory),
        Arc::new(DefaultClock),
    );

    Board {
        users,
        projects,
        tasks,
        directory,
        task_store,
    }
}

/// Builds a task form for `project_id` due on 1 June 2030.
#[must_use]
pub fn task_form(name: &str, project_id: i32, developer: &str) -> TaskForm {
    TaskForm::new(name, "Integration task", "01.06.2030")
        .with_project(project_id)
        .with_developer(developer)
}
