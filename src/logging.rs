//! Logging initialization.
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured level. Output goes to stderr so that command output on
//! stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

/// Build the filter directive: `RUST_LOG` if set and valid, the configured level otherwise.
fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the logging system.
pub fn init_logging(config: &LogConfig) -> AppResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| AppError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_uses_configured_level() {
        // Only meaningful when RUST_LOG is not set in the test environment
        if std::env::var_os("RUST_LOG").is_none() {
            let config = LogConfig {
                level: "warn".to_string(),
                json: false,
            };
            assert_eq!(env_filter(&config).to_string(), "warn");
        }
    }
}
