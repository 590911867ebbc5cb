//! `tracing` subscriber installation.

use crate::config::TaskboardSettings;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. An already
/// installed subscriber is kept; the failure is logged through it and
/// `false` is returned.
#[must_use]
pub fn init(settings: &TaskboardSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));
    let builder = fmt().with_env_filter(filter);
    let installed = if settings.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
        return false;
    }
    true
}
