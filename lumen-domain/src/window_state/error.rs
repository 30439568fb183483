//! Errors for the window-state store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while opening the window-state database.
///
/// Note that only opening reports errors to the caller; once the store is
/// running, failed reads and writes are logged and degrade to default-value
/// behaviour (window-state restoration is best-effort).
#[derive(Debug, Error)]
pub enum WindowStateError {
    /// The database file could not be opened.
    #[error("Failed to open window-state database at {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The schema could not be created.
    #[error("Failed to prepare window-state schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// The parent directory of the database could not be created.
    #[error("Failed to prepare window-state directory: {0}")]
    Directory(#[from] lumen_core::CoreError),

    /// The background writer thread could not be started.
    #[error("Failed to start window-state writer: {0}")]
    Worker(#[source] std::io::Error),
}
