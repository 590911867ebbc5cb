//! In-memory integration tests for role assignment seen through the workflow.

use super::helpers::{Board, board, task_form};
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::identity::{
    domain::{Role, UserId},
    services::UserDirectoryServiceError,
};
use taskboard::project::services::{ProjectForm, ProjectServiceError};
use taskboard::task::services::{TaskForm, TaskWorkflowError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn promoted_guest_can_work_on_assigned_task(#[future(awt)] board: Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    let project = board
        .projects
        .create(ProjectForm::new("Onboarding").with_manager("pm-1"), &admin)
        .await?;
    let task = board
        .tasks
        .create(task_form("First steps", project.id().value(), "guest"), &admin)
        .await?;

    let as_guest = board.actor("guest").await?;
    ensure!(board.tasks.list_visible(&as_guest).await?.is_empty());
    let early = TaskForm::from_task(&task, board.tasks.deadline_format()).with_progress(10);
    let refused = board.tasks.edit(task.id(), early.clone(), &as_guest).await;
    ensure!(matches!(refused, Err(TaskWorkflowError::Forbidden)));

    let profile = board.users.change_role("guest", "Developer", &admin).await?;
    ensure!(profile.role == Role::Developer);

    let as_developer = board.actor("guest").await?;
    ensure!(as_developer.role() == Role::Developer);
    let updated = board.tasks.edit(task.id(), early, &as_developer).await?;
    ensure!(updated.progress().value() == 10);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demoted_manager_loses_their_projects(#[future(awt)] board: Board) -> Result<()> {
    let manager = board.actor("pm-1").await?;
    let project = board
        .projects
        .create(ProjectForm::new("Sunset"), &manager)
        .await?;
    board
        .tasks
        .create(task_form("Wind down", project.id().value(), "dev-1"), &manager)
        .await?;

    let admin = board.actor("admin").await?;
    board.users.change_role("pm-1", "Default", &admin).await?;

    let demoted = board.actor("pm-1").await?;
    ensure!(board.tasks.list_visible(&demoted).await?.is_empty());
    let refused = board.projects.delete(project.id(), &demoted).await;
    ensure!(matches!(refused, Err(ProjectServiceError::Forbidden)));
    let managers = board.users.managers().await?;
    ensure!(managers.iter().all(|user| user.id().as_str() != "pm-1"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_stored_role_acts_without_rights(#[future(awt)] board: Board) -> Result<()> {
    let id = UserId::new("dev-2")?;
    board.directory.assign_raw_role(&id, "Auditor")?;

    let actor = board.actor("dev-2").await?;
    ensure!(actor.role() == Role::Default);
    ensure!(board.users.developers().await?.iter().all(|user| user.id() != &id));
    Ok(())
}

#[rstest]
#[case("pm-1", "Admin")]
#[case("dev-1", "Project Manager")]
#[case("guest", "Developer")]
#[tokio::test(flavor = "multi_thread")]
async fn only_admins_change_roles(
    #[future(awt)] board: Board,
    #[case] caller: &str,
    #[case] requested: &str,
) -> Result<()> {
    let actor = board.actor(caller).await?;

    let result = board.users.change_role(caller, requested, &actor).await;

    ensure!(matches!(result, Err(UserDirectoryServiceError::Forbidden)));
    let unchanged = board.actor(caller).await?;
    ensure!(unchanged.role() == actor.role());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_developer_can_no_longer_be_assigned(#[future(awt)] board: Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    let project = board
        .projects
        .create(ProjectForm::new("Roster").with_manager("pm-2"), &admin)
        .await?;
    board.users.remove_user("dev-2", &admin).await?;

    let result = board
        .tasks
        .create(task_form("Staffing", project.id().value(), "dev-2"), &admin)
        .await;

    let fields: Vec<&str> = match &result {
        Err(TaskWorkflowError::Validation(rejected)) => rejected.errors().fields().collect(),
        _ => Vec::new(),
    };
    ensure!(fields == ["developer_id"]);
    Ok(())
}
