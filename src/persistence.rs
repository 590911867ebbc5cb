//! `PostgreSQL` connection pooling shared by the diesel adapters.

use crate::config::TaskboardSettings;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

/// `PostgreSQL` connection pool type used by every diesel adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while building the connection pool.
#[derive(Debug, Error)]
pub enum PoolSetupError {
    /// No database URL was configured.
    #[error("database URL is not configured (set TASKBOARD_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The pool could not open its initial connections.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Builds a connection pool from the configured database URL.
///
/// # Errors
///
/// Returns [`PoolSetupError::MissingDatabaseUrl`] when no URL is configured
/// or [`PoolSetupError::Pool`] when the database cannot be reached.
pub fn build_pool(settings: &TaskboardSettings) -> Result<PgPool, PoolSetupError> {
    let url = settings
        .database_url
        .as_deref()
        .ok_or(PoolSetupError::MissingDatabaseUrl)?;
    let max_size = settings.pool_max_size();
    let pool = Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    info!(max_size, "database pool ready");
    Ok(pool)
}
