//! Error handling for the Lumen core layer.
//!
//! This module defines the error types shared across the core layer using
//! the `thiserror` crate. The main error type is [`CoreError`], which wraps
//! the more specific [`ConfigError`] and [`LoggingError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the Lumen shell stack.
///
/// Used as the common error type throughout the core layer, usually by
/// wrapping one of the more specific error enums below.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while initializing the logging system.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem operations that failed outside of configuration or
    /// logging, such as creating the state directory.
    #[error("Filesystem error: {message} (path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by a more specific variant.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value supplied by the caller failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An unexpected internal condition.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors produced while locating, reading, or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine a configuration directory for the current user")]
    DirectoryResolution,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed as TOML.
    #[error("Failed to parse configuration file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors produced while setting up the logging subsystem.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize the global tracing subscriber: {0}")]
    Initialization(String),

    /// The log file or its parent directory could not be prepared.
    #[error("Failed to set up log file at {path:?}")]
    FileAppender {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured log level is not a recognized level or filter.
    #[error("Invalid log level specification '{0}'")]
    InvalidLevel(String),
}
