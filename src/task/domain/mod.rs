//! Domain model for tasks and their workflow rules.
//!
//! Infrastructure concerns stay outside: the domain only knows projects and
//! users through their identifiers, and the acting user through
//! [`Actor`](crate::identity::domain::Actor).

mod access;
mod deadline;
mod error;
mod ids;
mod status;
mod task;

pub use access::{AccessDenial, Grant, TaskAccess, TaskRelation, field_grant};
pub use deadline::{Deadline, DeadlineFormat};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{
    ManagerSnapshot, NewTask, PersistedTaskData, Task, TaskDescription, TaskDetails, TaskEdit,
    TaskField, TaskName,
};
