//! Shared world state for task workflow BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::identity::{
    adapters::memory::InMemoryUserDirectory, domain::Actor, services::UserDirectoryService,
};
use taskboard::project::adapters::memory::InMemoryProjectStore;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{TaskWorkflowError, TaskWorkflowService},
};

/// Service type used by the BDD world.
pub type TestWorkflowService = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryProjectStore,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub users: UserDirectoryService<InMemoryUserDirectory>,
    pub projects: Arc<InMemoryProjectStore>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub service: TestWorkflowService,
    pub last_task: Option<Task>,
    pub last_error: Option<TaskWorkflowError>,
}

impl TaskWorkflowWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let projects = Arc::new(InMemoryProjectStore::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let service = TaskWorkflowService::new(
            Arc::clone(&tasks),
            Arc::clone(&projects),
            Arc::clone(&directory),
            Arc::new(DefaultClock),
        );

        Self {
            users: UserDirectoryService::new(directory),
            projects,
            tasks,
            service,
            last_task: None,
            last_error: None,
        }
    }

    /// Resolves the acting user by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is blank or lookup fails.
    pub fn actor(&self, id: &str) -> Result<Actor, eyre::Report> {
        Ok(run_async(self.users.resolve_actor(id))?)
    }

    /// Loads a stored task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is missing or lookup fails.
    pub fn stored(&self, id: i32) -> Result<Task, eyre::Report> {
        run_async(self.tasks.find(TaskId::new(id)))?
            .ok_or_else(|| eyre::eyre!("task {id} missing from the repository"))
    }

    /// Records the outcome of a workflow call.
    pub fn record(&mut self, result: Result<Option<Task>, TaskWorkflowError>) {
        match result {
            Ok(task) => {
                self.last_task = task;
                self.last_error = None;
            }
            Err(err) => {
                self.last_task = None;
                self.last_error = Some(err);
            }
        }
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
