//! Runtime configuration loaded via `OrthoConfig`.
//!
//! Values are layered from defaults, configuration files, `TASKBOARD_*`
//! environment variables and command-line flags.

use crate::task::domain::{DeadlineFormat, TaskDomainError};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_POOL_MAX_SIZE: u32 = 8;
const DEFAULT_DEADLINE_FORMAT: &str = "%d.%m.%Y";
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings controlling persistence, deadline parsing and logging.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKBOARD")]
pub struct TaskboardSettings {
    /// `PostgreSQL` connection URL. In-memory adapters need none.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// `strftime` pattern deadlines are submitted in.
    pub deadline_format: Option<String>,
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl TaskboardSettings {
    /// Return the configured pool size, falling back to the default.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Return the configured log filter, falling back to the default.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Return the validated deadline format, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadlineFormat`] when the configured
    /// pattern cannot render and re-read a calendar date.
    pub fn deadline_format(&self) -> Result<DeadlineFormat, TaskDomainError> {
        DeadlineFormat::new(
            self.deadline_format
                .as_deref()
                .unwrap_or(DEFAULT_DEADLINE_FORMAT),
        )
    }
}
