//! Logging setup for the Lumen shell stack.
//!
//! Built on the `tracing` ecosystem: a console layer filtered by the
//! configured level (or `RUST_LOG`), plus an optional non-blocking file
//! layer with text or JSON formatting.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Initializes a minimal logging setup directed at `stderr`.
///
/// Intended for tests and early startup before configuration is available.
/// Filters via `RUST_LOG`, defaulting to "info". Errors (such as a logger
/// already being installed) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Initializes the global logger from the given configuration.
///
/// Returns the file appender's [`WorkerGuard`] when file logging is enabled;
/// the caller must keep it alive for the lifetime of the process or buffered
/// log lines are lost.
pub fn initialize_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, CoreError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|_| LoggingError::InvalidLevel(config.level.clone()))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = Vec::new();
    layers.push(filter.boxed());
    layers.push(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .boxed(),
    );

    let mut guard = None;
    if let Some(path) = &config.file_path {
        let (layer, file_guard) = create_file_layer(path, &config.format)?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::Initialization(e.to_string()))?;

    Ok(guard)
}

/// Creates a non-blocking file logging layer and its flush guard.
fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("lumen.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        match format.to_ascii_lowercase().as_str() {
            "json" => fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
            _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        };

    Ok((layer, guard))
}
