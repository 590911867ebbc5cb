//! Builders shared by the task unit tests.

use crate::identity::domain::UserId;
use crate::project::domain::{NewProject, Progress, Project, ProjectId, ProjectName};
use crate::task::domain::{
    Deadline, NewTask, Task, TaskDescription, TaskDetails, TaskEdit, TaskId, TaskName, TaskStatus,
};
use chrono::NaiveDate;
use mockable::DefaultClock;

pub(super) fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub(super) fn project(id: i32, manager: &str) -> Project {
    NewProject::new(ProjectName::new("Apollo").expect("valid name"), user(manager))
        .into_project(ProjectId::new(id))
}

pub(super) fn deadline(year: i32, month: u32, day: u32) -> Deadline {
    Deadline::new(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
}

/// Task 3 of project 1 (managed by "pm-1"), assigned to "dev-1".
pub(super) fn task_with_status(status: TaskStatus) -> Task {
    let details = TaskDetails {
        name: TaskName::new("Task 3").expect("valid name"),
        description: TaskDescription::new("Ship it").expect("valid description"),
        deadline: deadline(2030, 6, 1),
        developer_id: Some(user("dev-1")),
    };
    let mut task =
        NewTask::new(details, &project(1, "pm-1"), &DefaultClock).into_task(TaskId::new(3));
    let edit = TaskEdit {
        status,
        ..edit_of(&task)
    };
    task.apply(edit, &DefaultClock);
    task
}

/// An edit that keeps every field of `task`.
pub(super) fn edit_of(task: &Task) -> TaskEdit {
    TaskEdit {
        name: task.name().clone(),
        description: task.description().clone(),
        deadline: task.deadline(),
        status: task.status(),
        progress: task.progress(),
        developer_id: task.developer_id().cloned(),
        manager_id: task.manager_id().cloned(),
        project_id: task.project_id(),
    }
}

pub(super) fn progress(value: i64) -> Progress {
    Progress::new(value).expect("valid progress")
}
