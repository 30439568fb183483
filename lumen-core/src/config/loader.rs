//! Configuration loading.

use super::types::CoreConfig;
use crate::error::ConfigError;
use directories_next::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "lumen.toml";

/// Loads [`CoreConfig`] from the platform configuration directory.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration from the default location.
    ///
    /// A missing configuration file is not an error; the default
    /// configuration is returned in that case.
    pub fn load() -> Result<CoreConfig, ConfigError> {
        let path = Self::default_config_path()?;
        Self::load_from(&path)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// Used by tests and by deployments that pin the configuration location.
    pub fn load_from(path: &Path) -> Result<CoreConfig, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "No configuration file found, using defaults");
            return Ok(CoreConfig::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolves the default configuration file path for the current user.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dirs =
            ProjectDirs::from("org", "lumen", "lumen").ok_or(ConfigError::DirectoryResolution)?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the default window-state database path for the current user.
    ///
    /// The database lives under the cache directory: losing it degrades
    /// window placement, it does not lose user data.
    pub fn default_state_db_path() -> Result<PathBuf, ConfigError> {
        let dirs =
            ProjectDirs::from("org", "lumen", "lumen").ok_or(ConfigError::DirectoryResolution)?;
        Ok(dirs.cache_dir().join("windowstate.sqlite"))
    }
}
