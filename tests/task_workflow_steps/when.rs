//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::{domain::TaskId, services::TaskForm};

#[when(
    r#""{actor}" creates a task "{name}" due "{deadline}" in project {project_id:i32} for developer "{developer}""#
)]
fn create_task(
    world: &mut TaskWorkflowWorld,
    actor: String,
    name: String,
    deadline: String,
    project_id: i32,
    developer: String,
) -> Result<(), eyre::Report> {
    let acting = world.actor(&actor)?;
    let form = TaskForm::new(name, "Created in a scenario", deadline)
        .with_project(project_id)
        .with_developer(developer);
    let result = run_async(world.service.create(form, &acting));
    world.record(result.map(Some));
    Ok(())
}

#[when(r#""{actor}" renames task {id:i32} to "{name}""#)]
fn rename_task(
    world: &mut TaskWorkflowWorld,
    actor: String,
    id: i32,
    name: String,
) -> Result<(), eyre::Report> {
    let acting = world.actor(&actor)?;
    let task = world.stored(id)?;
    let form = TaskForm::from_task(&task, world.service.deadline_format()).with_name(name);
    let result = run_async(world.service.edit(TaskId::new(id), form, &acting));
    world.record(result.map(Some));
    Ok(())
}

#[when(r#""{actor}" moves task {id:i32} to status "{status}""#)]
fn move_task(
    world: &mut TaskWorkflowWorld,
    actor: String,
    id: i32,
    status: String,
) -> Result<(), eyre::Report> {
    let acting = world.actor(&actor)?;
    let task = world.stored(id)?;
    let form = TaskForm::from_task(&task, world.service.deadline_format()).with_status(status);
    let result = run_async(world.service.edit(TaskId::new(id), form, &acting));
    world.record(result.map(Some));
    Ok(())
}

#[when(r#""{actor}" deletes task {id:i32}"#)]
fn delete_task(world: &mut TaskWorkflowWorld, actor: String, id: i32) -> Result<(), eyre::Report> {
    let acting = world.actor(&actor)?;
    let result = run_async(world.service.delete(TaskId::new(id), &acting));
    world.record(result.map(|()| None));
    Ok(())
}
