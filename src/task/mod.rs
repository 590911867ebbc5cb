//! Task assignment and status workflow.
//!
//! Tasks belong to a project, are worked on by at most one developer and are
//! tracked by the manager the project had when the task was created. Every
//! change goes through [`services::TaskWorkflowService`], which validates the
//! submitted form, resolves how the acting user relates to the task and
//! checks each changed field against a single permission table
//! ([`domain::field_grant`]). The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
