//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level when it is set.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};

/// Build the filter for `config`, honoring `RUST_LOG`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy()
}

/// Install a global fmt subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        ProtocolError::ConfigError(format!("Failed to install log subscriber: {e}"))
    })?;

    tracing::info!(app = %config.app_name, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            log_level: Level::DEBUG,
            ..LoggingConfig::default()
        };
        // Whichever call installs first, the other must report an error.
        let first = init_logging(&config);
        let second = init_logging(&config);
        assert!(first.is_err() || second.is_err());
    }
}
