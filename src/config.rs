//! # Configuration Management
//!
//! Centralized configuration for the envelope client.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`
//!
//! Timeouts are the only cancellation mechanism a round trip has, so the
//! validator rejects values that would let a request hang indefinitely.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Protocol version the client speaks unless configured otherwise
pub const PROTOCOL_VERSION: i64 = 3;

/// Name of the single form field carrying the request document
pub const MESSAGE_FIELD: &str = "message";

/// Max accepted response body (e.g. 4 MB)
pub const MAX_RESPONSE_SIZE: usize = 4 * 1024 * 1024;

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProtocolConfig {
    /// Client-specific configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProtocolConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TDS_SERVER_URL") {
            config.client.server_url = url;
        }

        if let Ok(version) = std::env::var("TDS_PROTOCOL_VERSION") {
            config.client.protocol_version = version.parse::<i64>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid TDS_PROTOCOL_VERSION '{version}': {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("TDS_CONNECT_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.client.connect_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(timeout) = std::env::var("TDS_READ_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.client.read_timeout = Duration::from_millis(val);
            }
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.client.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Client-specific configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Coordination server endpoint
    pub server_url: String,

    /// Version placed in every request and expected back in full replies
    pub protocol_version: i64,

    /// Timeout for establishing the connection
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,

    /// Timeout for the whole request/response exchange
    #[serde(with = "duration_serde")]
    pub read_timeout: Duration,

    /// User-Agent header sent with each request
    pub user_agent: String,

    /// Largest response body accepted from the server
    pub max_response_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: String::from("http://127.0.0.1:8080/"),
            protocol_version: PROTOCOL_VERSION,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            user_agent: format!("tds-envelope/{}", env!("CARGO_PKG_VERSION")),
            max_response_size: MAX_RESPONSE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Validate client configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.server_url.is_empty() {
            errors.push("Server URL cannot be empty".to_string());
        } else if !(self.server_url.starts_with("http://")
            || self.server_url.starts_with("https://"))
        {
            errors.push(format!(
                "Invalid server URL: '{}' (expected an http:// or https:// URL)",
                self.server_url
            ));
        }

        if self.protocol_version <= 0 {
            errors.push(format!(
                "Protocol version must be positive (got {})",
                self.protocol_version
            ));
        }

        if self.connect_timeout.as_millis() < 100 {
            errors.push("Connect timeout too short (minimum: 100ms)".to_string());
        } else if self.connect_timeout.as_secs() > 300 {
            errors.push("Connect timeout too long (maximum: 300s)".to_string());
        }

        if self.read_timeout.as_millis() < 100 {
            errors.push("Read timeout too short (minimum: 100ms)".to_string());
        } else if self.read_timeout.as_secs() > 600 {
            errors.push("Read timeout too long (maximum: 600s)".to_string());
        }

        if self.user_agent.is_empty() {
            errors.push("User agent cannot be empty".to_string());
        }

        if self.max_response_size == 0 {
            errors.push("Max response size cannot be 0".to_string());
        } else if self.max_response_size > 64 * 1024 * 1024 {
            errors.push(format!(
                "Max response size too large: {} bytes (maximum recommended: 64 MB)",
                self.max_response_size
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,

    /// Whether to log full request and response documents at debug level
    pub log_bodies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("tds-envelope"),
            log_level: Level::INFO,
            json_format: false,
            log_bodies: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for Duration serialization/deserialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
