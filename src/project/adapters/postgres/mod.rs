//! `PostgreSQL` adapter for project persistence.

mod models;
mod schema;
mod store;

pub use store::PostgresProjectStore;
