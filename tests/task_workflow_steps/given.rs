//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::identity::domain::{Role, User, UserId};
use taskboard::project::{
    domain::{NewProject, ProjectName},
    ports::ProjectStore,
};
use taskboard::task::{domain::TaskId, services::TaskForm};

#[given(r#"a user "{id}" with role "{role}""#)]
fn user_with_role(
    world: &mut TaskWorkflowWorld,
    id: String,
    role: String,
) -> Result<(), eyre::Report> {
    let parsed = Role::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    let user = User::new(UserId::new(id.as_str())?, id.as_str(), "Example")?;
    run_async(world.users.register(user, Some(parsed))).wrap_err("register scenario user")?;
    Ok(())
}

#[given(r#"a project "{name}" managed by "{manager}""#)]
fn project_managed_by(
    world: &mut TaskWorkflowWorld,
    name: String,
    manager: String,
) -> Result<(), eyre::Report> {
    let project = NewProject::new(ProjectName::new(name)?, UserId::new(manager)?);
    run_async(world.projects.add(&project)).wrap_err("seed scenario project")?;
    Ok(())
}

#[given(r#"a task "{name}" in project {project_id:i32} assigned to "{developer}""#)]
fn task_in_project(
    world: &mut TaskWorkflowWorld,
    name: String,
    project_id: i32,
    developer: String,
) -> Result<(), eyre::Report> {
    let admin = world.actor("admin")?;
    let form = TaskForm::new(name, "Seeded by the scenario background", "01.06.2030")
        .with_project(project_id)
        .with_developer(developer);
    run_async(world.service.create(form, &admin)).wrap_err("seed scenario task")?;
    Ok(())
}

#[given(r#"task {id:i32} has been moved to status "{status}" by "{actor}""#)]
fn task_moved_to_status(
    world: &mut TaskWorkflowWorld,
    id: i32,
    status: String,
    actor: String,
) -> Result<(), eyre::Report> {
    let acting = world.actor(&actor)?;
    let task = world.stored(id)?;
    let form = TaskForm::from_task(&task, world.service.deadline_format()).with_status(status);
    run_async(world.service.edit(TaskId::new(id), form, &acting))
        .wrap_err("move scenario task")?;
    Ok(())
}
