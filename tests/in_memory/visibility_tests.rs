//! In-memory integration tests for task listings per role.

use super::helpers::{Board, board, task_form};
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::project::services::ProjectForm;
use taskboard::task::{domain::Task, services::TaskForm};

/// Seeds two projects, one per manager, each with a task for each developer.
async fn seed(board: &Board) -> Result<()> {
    let admin = board.actor("admin").await?;
    for (project_name, manager) in [("North", "pm-1"), ("South", "pm-2")] {
        let project = board
            .projects
            .create(ProjectForm::new(project_name).with_manager(manager), &admin)
            .await?;
        for developer in ["dev-1", "dev-2"] {
            let name = format!("{project_name} for {developer}");
            board
                .tasks
                .create(task_form(&name, project.id().value(), developer), &admin)
                .await?;
        }
    }
    Ok(())
}

fn names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.name().as_str()).collect()
}

#[rstest]
#[case("admin", &["North for dev-1", "North for dev-2", "South for dev-1", "South for dev-2"])]
#[case("pm-1", &["North for dev-1", "North for dev-2"])]
#[case("pm-2", &["South for dev-1", "South for dev-2"])]
#[case("dev-1", &["North for dev-1", "South for dev-1"])]
#[case("dev-2", &["North for dev-2", "South for dev-2"])]
#[case("guest", &[])]
#[tokio::test(flavor = "multi_thread")]
async fn each_role_sees_its_own_tasks(
    #[future(awt)] board: Board,
    #[case] viewer: &str,
    #[case] expected: &[&str],
) -> Result<()> {
    seed(&board).await?;
    let actor = board.actor(viewer).await?;

    let visible = board.tasks.list_visible(&actor).await?;

    ensure!(
        names(&visible) == expected,
        "{viewer} saw {:?}",
        names(&visible)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigning_a_developer_hides_the_task_from_them(
    #[future(awt)] board: Board,
) -> Result<()> {
    seed(&board).await?;
    let manager = board.actor("pm-1").await?;
    let developer = board.actor("dev-1").await?;

    let before = board.tasks.list_visible(&developer).await?;
    let Some(task) = before.iter().find(|task| task.project_id().value() == 1) else {
        eyre::bail!("dev-1 has no task in North");
    };
    let cleared = TaskForm::from_task(task, board.tasks.deadline_format()).without_developer();
    let edited = board.tasks.edit(task.id(), cleared, &manager).await?;
    ensure!(edited.developer_id().is_none());

    let after = board.tasks.list_visible(&developer).await?;
    ensure!(names(&after) == ["South for dev-1"]);
    Ok(())
}
