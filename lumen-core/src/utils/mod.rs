//! Utility helpers shared across the Lumen stack.

pub mod fs;
