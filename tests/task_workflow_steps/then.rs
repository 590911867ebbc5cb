//! Then steps for task workflow BDD scenarios.

use super::world::TaskWorkflowWorld;
use rstest_bdd_macros::then;
use taskboard::task::{
    domain::{Task, TaskId, TaskStatus},
    services::TaskWorkflowError,
};

fn last_task(world: &TaskWorkflowWorld) -> Result<&Task, eyre::Report> {
    if let Some(err) = world.last_error.as_ref() {
        return Err(eyre::eyre!("expected a task, the request failed: {err}"));
    }
    world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
}

fn last_error(world: &TaskWorkflowWorld) -> Result<&TaskWorkflowError, eyre::Report> {
    world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))
}

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then("the task is saved as task {id:i32}")]
fn task_saved_as(world: &TaskWorkflowWorld, id: i32) -> Result<(), eyre::Report> {
    let task = last_task(world)?;
    eyre::ensure!(task.id() == TaskId::new(id), "saved as task {}", task.id());
    Ok(())
}

#[then(r#"the task records manager "{manager}""#)]
fn task_records_manager(world: &TaskWorkflowWorld, manager: String) -> Result<(), eyre::Report> {
    let task = last_task(world)?;
    let recorded = task.manager_id().map(|id| id.as_str().to_owned());
    eyre::ensure!(
        recorded.as_deref() == Some(manager.as_str()),
        "recorded manager {recorded:?}"
    );
    Ok(())
}

#[then(r#"the task has status "{status}" and progress {progress:u8}"#)]
fn task_has_status_and_progress(
    world: &TaskWorkflowWorld,
    status: String,
    progress: u8,
) -> Result<(), eyre::Report> {
    let task = last_task(world)?;
    let expected = parse_status(&status)?;
    eyre::ensure!(task.status() == expected, "status is {}", task.status());
    eyre::ensure!(
        task.progress().value() == progress,
        "progress is {}",
        task.progress().value()
    );
    Ok(())
}

#[then(r#"task {id:i32} is named "{name}""#)]
fn task_is_named(world: &TaskWorkflowWorld, id: i32, name: String) -> Result<(), eyre::Report> {
    let task = world.stored(id)?;
    eyre::ensure!(
        task.name().as_str() == name,
        "task {id} is named {}",
        task.name().as_str()
    );
    Ok(())
}

#[then(r#"task {id:i32} has status "{status}""#)]
fn task_has_status(world: &TaskWorkflowWorld, id: i32, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = world.stored(id)?;
    eyre::ensure!(task.status() == expected, "task {id} is {}", task.status());
    Ok(())
}

#[then("the request is forbidden")]
fn request_is_forbidden(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskWorkflowError::Forbidden),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then("the request fails because task {id:i32} was not found")]
fn request_not_found(world: &TaskWorkflowWorld, id: i32) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskWorkflowError::NotFound(missing) if *missing == TaskId::new(id)),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then(r#"the form is rejected on field "{field}""#)]
fn form_rejected_on(world: &TaskWorkflowWorld, field: String) -> Result<(), eyre::Report> {
    let TaskWorkflowError::Validation(rejected) = last_error(world)? else {
        return Err(eyre::eyre!("expected a validation failure"));
    };
    let fields: Vec<&str> = rejected.errors().fields().collect();
    eyre::ensure!(fields == [field.as_str()], "rejected fields {fields:?}");
    Ok(())
}

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &TaskWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.tasks.len()?;
    eyre::ensure!(stored == count, "board holds {stored} tasks");
    Ok(())
}
