//! Application services for the task workflow.

mod form;
mod workflow;

pub use form::TaskForm;
pub use workflow::{TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
