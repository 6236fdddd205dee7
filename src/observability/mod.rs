//! Logging setup for the dbt extractor.

use crate::config::ObservabilityConfig;
use crate::error::{ExtractorError, Result};
use ::tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
///
/// Logs go to stderr so record output on stdout stays machine readable.
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| ExtractorError::Config(format!("Failed to init logging: {}", e)))?;
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| ExtractorError::Config(format!("Failed to init logging: {}", e)))?;
    }

    debug!(level = %config.log_level, json = config.json_logs, "Logging initialized");
    Ok(())
}
