//! Core value types shared across the Lumen shell stack.

pub mod app_identifier;
pub mod geometry;
pub mod window;

pub use app_identifier::AppIdentifier;
pub use geometry::{PointInt, RectInt, SizeInt};
pub use window::{SurfaceState, WindowState};
