//! Application services for project management.

mod management;

pub use management::{ProjectForm, ProjectService, ProjectServiceError, ProjectServiceResult};
