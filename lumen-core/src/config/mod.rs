//! Configuration management for the Lumen shell stack.
//!
//! Configuration is loaded from a single TOML file in the platform
//! configuration directory. Missing files and missing fields fall back to
//! defaults, so a bare installation runs without any configuration on disk.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, StorageConfig};
