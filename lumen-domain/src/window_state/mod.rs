//! Window-state persistence.
//!
//! Records each window's last-known state, geometry, and stage in an
//! embedded SQLite database so they survive shell restarts. Restoration is
//! best-effort: failures degrade to caller-supplied defaults, they never
//! reach the user.

pub mod error;
pub mod store;

#[cfg(test)]
mod store_tests;

pub use error::WindowStateError;
pub use store::WindowStateStore;
