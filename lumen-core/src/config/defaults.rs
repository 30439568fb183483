//! Default values for configuration fields absent from the TOML source.

use std::path::PathBuf;

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_state_db_path() -> Option<PathBuf> {
    None
}
