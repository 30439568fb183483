//! # Lumen Core Library (`lumen-core`)
//!
//! `lumen-core` is the foundation layer of the Lumen shell stack. It carries
//! the concerns every layer above it relies on:
//!
//! - **Error handling**: a unified error system through [`CoreError`] and the
//!   specific [`ConfigError`] and [`LoggingError`] enums.
//! - **Core data types**: integer geometry ([`types::RectInt`]), application
//!   identification ([`types::AppIdentifier`]), and the window/surface state
//!   vocabulary ([`types::WindowState`], [`types::SurfaceState`]).
//! - **Configuration**: TOML-based loading with defaults and validation via
//!   [`config::ConfigLoader`] and [`config::CoreConfig`].
//! - **Logging**: a `tracing`-based setup configurable for console and file
//!   output through [`logging::initialize_logging`].
//!
//! Key components are re-exported at the crate root.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, StorageConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_minimal_logging, initialize_logging};
pub use types::{AppIdentifier, PointInt, RectInt, SizeInt, SurfaceState, WindowState};
