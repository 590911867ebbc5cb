//! In-memory integration tests for projects and tasks working together.

use super::helpers::{Board, board, task_form};
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::identity::domain::UserId;
use taskboard::project::{
    domain::ProjectId,
    services::{ProjectForm, ProjectServiceError},
};
use taskboard::task::{
    domain::{TaskId, TaskStatus},
    services::{TaskForm, TaskWorkflowError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_runs_a_project_from_creation_to_completion(
    #[future(awt)] board: Board,
) -> Result<()> {
    let manager = board.actor("pm-1").await?;
    let developer = board.actor("dev-1").await?;

    let project = board
        .projects
        .create(ProjectForm::new("Harbour"), &manager)
        .await?;
    ensure!(project.is_managed_by(manager.user_id()));

    let task = board
        .tasks
        .create(task_form("Survey", project.id().value(), "dev-1"), &manager)
        .await?;
    ensure!(task.manager_id().map(UserId::as_str) == Some("pm-1"));

    let reported = TaskForm::from_task(&task, board.tasks.deadline_format())
        .with_progress(60)
        .with_status("InProgress");
    let updated = board.tasks.edit(task.id(), reported, &developer).await?;
    ensure!(updated.status() == TaskStatus::InProgress);
    ensure!(updated.progress().value() == 60);

    let refreshed = board.projects.recalculate_progress(project.id()).await?;
    ensure!(refreshed.progress().value() == 60);

    let finished = TaskForm::from_task(&updated, board.tasks.deadline_format())
        .with_progress(100)
        .with_status("Finished");
    board.tasks.edit(task.id(), finished, &developer).await?;

    let completed = board.projects.recalculate_progress(project.id()).await?;
    ensure!(completed.progress().value() == 100);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_progress_is_the_rounded_down_mean(#[future(awt)] board: Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    let project = board
        .projects
        .create(ProjectForm::new("Lighthouse").with_manager("pm-2"), &admin)
        .await?;

    for (name, progress) in [("A", 33), ("B", 33), ("C", 35)] {
        let task = board
            .tasks
            .create(task_form(name, project.id().value(), "dev-2"), &admin)
            .await?;
        let reported =
            TaskForm::from_task(&task, board.tasks.deadline_format()).with_progress(progress);
        board.tasks.edit(task.id(), reported, &admin).await?;
    }

    let refreshed = board.projects.recalculate_progress(project.id()).await?;
    ensure!(refreshed.progress().value() == 33);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handing_a_project_over_keeps_the_task_manager(#[future(awt)] board: Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    let project = board
        .projects
        .create(ProjectForm::new("Relay").with_manager("pm-1"), &admin)
        .await?;
    let task = board
        .tasks
        .create(task_form("Cable", project.id().value(), "dev-1"), &admin)
        .await?;

    board
        .projects
        .edit(
            project.id(),
            ProjectForm::new("Relay").with_manager("pm-2"),
            &admin,
        )
        .await?;

    let stored = board.tasks.find(task.id()).await?;
    let snapshot = stored.as_ref().and_then(|found| found.manager_id());
    ensure!(snapshot.map(UserId::as_str) == Some("pm-1"));

    let new_owner = board.actor("pm-2").await?;
    let renamed = TaskForm::from_task(&task, board.tasks.deadline_format()).with_name("Fibre");
    let edited = board.tasks.edit(task.id(), renamed, &new_owner).await?;
    ensure!(edited.name().as_str() == "Fibre");

    let old_owner = board.actor("pm-1").await?;
    let refused = board
        .tasks
        .edit(
            task.id(),
            TaskForm::from_task(&edited, board.tasks.deadline_format()).with_name("Copper"),
            &old_owner,
        )
        .await;
    ensure!(matches!(refused, Err(TaskWorkflowError::Forbidden)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_only_its_tasks(#[future(awt)] board: Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    let doomed = board
        .projects
        .create(ProjectForm::new("Doomed").with_manager("pm-1"), &admin)
        .await?;
    let kept = board
        .projects
        .create(ProjectForm::new("Kept").with_manager("pm-2"), &admin)
        .await?;
    for name in ["One", "Two"] {
        board
            .tasks
            .create(task_form(name, doomed.id().value(), "dev-1"), &admin)
            .await?;
    }
    let survivor = board
        .tasks
        .create(task_form("Three", kept.id().value(), "dev-1"), &admin)
        .await?;

    let stranger = board.actor("pm-2").await?;
    let refused = board.projects.delete(doomed.id(), &stranger).await;
    ensure!(matches!(refused, Err(ProjectServiceError::Forbidden)));
    ensure!(board.task_store.len()? == 3);

    let owner = board.actor("pm-1").await?;
    board.projects.delete(doomed.id(), &owner).await?;

    ensure!(board.task_store.len()? == 1);
    ensure!(board.tasks.find(survivor.id()).await?.is_some());
    ensure!(board.projects.find(doomed.id()).await?.is_none());
    let missing = board.projects.delete(doomed.id(), &owner).await;
    ensure!(matches!(missing, Err(ProjectServiceError::NotFound(id)) if id == doomed.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_cannot_be_filed_under_a_missing_project(#[future(awt)] board: Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    let result = board
        .tasks
        .create(task_form("Orphan", 77, "dev-1"), &admin)
        .await;

    let fields: Vec<&str> = match &result {
        Err(TaskWorkflowError::Validation(rejected)) => rejected.errors().fields().collect(),
        _ => Vec::new(),
    };
    ensure!(fields == ["project_id"]);
    ensure!(board.projects.find(ProjectId::new(77)).await?.is_none());
    ensure!(board.tasks.find(TaskId::new(1)).await?.is_none());
    Ok(())
}
