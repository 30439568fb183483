//! Configuration data structures.
//!
//! These structs are deserialized from TOML with `serde`, apply defaults for
//! absent fields, and reject unknown fields so that typos surface as load
//! errors instead of silently ignored settings.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration for the Lumen shell stack.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Logging subsystem settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Durable-state settings (window-state database location).
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration settings for the logging subsystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error",
    /// or any `tracing_subscriber` filter directive.
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a file where logs should be written.
    /// If `None`, file logging is disabled.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// Format for log messages written to a file: "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Configuration for durable shell state.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path of the window-state SQLite database.
    /// If `None`, a path under the platform cache directory is used.
    #[serde(default = "defaults::default_state_db_path")]
    pub state_db_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            state_db_path: defaults::default_state_db_path(),
        }
    }
}
