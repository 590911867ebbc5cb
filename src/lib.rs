//! Taskboard: role-gated project and task workflow core.
//!
//! This crate provides the domain model and services behind a small
//! project-management system: users hold one of four roles, project managers
//! own projects, and tasks move through a forward-only status workflow in
//! which every field change is checked against a single permission table.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`identity`]: Users, roles and the acting user of a request
//! - [`project`]: Projects and progress aggregation
//! - [`task`]: Task creation, role-gated editing and deletion
//! - [`config`]: Layered runtime configuration
//! - [`telemetry`]: Logging setup

pub mod config;
pub mod identity;
pub mod persistence;
pub mod project;
pub mod task;
pub mod telemetry;
pub mod validation;
