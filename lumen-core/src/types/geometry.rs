//! Integer geometric primitives for window placement.

use serde::{Deserialize, Serialize};

/// An integer point with `i32` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointInt {
    pub x: i32,
    pub y: i32,
}

impl PointInt {
    /// Creates a new `PointInt`.
    pub const fn new(x: i32, y: i32) -> Self {
        PointInt { x, y }
    }
}

/// An integer size with `u32` dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeInt {
    pub width: u32,
    pub height: u32,
}

impl SizeInt {
    /// Creates a new `SizeInt`.
    pub const fn new(width: u32, height: u32) -> Self {
        SizeInt { width, height }
    }

    /// Checks if the area is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An integer rectangle with `i32` origin and `u32` size.
///
/// This is the unit of persisted window geometry: a window's last-known
/// position and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RectInt {
    /// The origin point (top-left corner) of the rectangle.
    pub origin: PointInt,
    /// The size (width and height) of the rectangle.
    pub size: SizeInt,
}

impl RectInt {
    /// Creates a new `RectInt` from an origin point and a size.
    pub const fn new(origin: PointInt, size: SizeInt) -> Self {
        RectInt { origin, size }
    }

    /// Creates a new `RectInt` from individual coordinate and dimension values.
    pub const fn from_coords(x: i32, y: i32, width: u32, height: u32) -> Self {
        RectInt {
            origin: PointInt::new(x, y),
            size: SizeInt::new(width, height),
        }
    }

    /// Returns the x-coordinate of the rectangle's origin.
    pub fn x(&self) -> i32 {
        self.origin.x
    }

    /// Returns the y-coordinate of the rectangle's origin.
    pub fn y(&self) -> i32 {
        self.origin.y
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// A rectangle is valid when it has a positive width and height.
    ///
    /// Restoring an invalid rectangle would place a window with no visible
    /// area, so consumers fall back to a default instead.
    pub fn is_valid(&self) -> bool {
        !self.size.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_rect_is_invalid() {
        assert!(!RectInt::from_coords(10, 10, 0, 100).is_valid());
        assert!(!RectInt::from_coords(10, 10, 100, 0).is_valid());
        assert!(RectInt::from_coords(-5, -5, 1, 1).is_valid());
    }
}
