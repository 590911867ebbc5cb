//! Domain model for projects.

mod error;
mod ids;
mod progress;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use progress::Progress;
pub use project::{NewProject, PersistedProjectData, Project, ProjectName};
