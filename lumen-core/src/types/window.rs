//! Window and surface state enums.
//!
//! [`WindowState`] is the persisted, shell-side notion of a window's state.
//! Its values are bitmask-shaped for storage compatibility, but exactly one
//! value is ever held at a time. [`SurfaceState`] is the smaller state
//! vocabulary the compositor side understands; the projection from
//! [`WindowState`] to [`SurfaceState`] is lossy and one-way.

use serde::{Deserialize, Serialize};

/// Persisted state of a shell window.
///
/// The discriminants are single bits so that values stored by older shell
/// versions keep their meaning. Values are mutually exclusive in practice;
/// they are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum WindowState {
    Normal = 1 << 0,
    Maximized = 1 << 1,
    Minimized = 1 << 2,
    Fullscreen = 1 << 3,
    MaximizedLeft = 1 << 4,
    MaximizedRight = 1 << 5,
    MaximizedHorizontally = 1 << 6,
    MaximizedVertically = 1 << 7,
    MaximizedTopLeft = 1 << 8,
    MaximizedTopRight = 1 << 9,
    MaximizedBottomLeft = 1 << 10,
    MaximizedBottomRight = 1 << 11,
    Restored = 1 << 12,
}

impl WindowState {
    /// The raw integer stored in the window-state database.
    pub fn to_raw(self) -> u32 {
        self as u32
    }

    /// Decodes a raw stored value back into a `WindowState`.
    ///
    /// Returns `None` for values that are not exactly one known state,
    /// including combined bitmasks.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            v if v == WindowState::Normal as u32 => Some(WindowState::Normal),
            v if v == WindowState::Maximized as u32 => Some(WindowState::Maximized),
            v if v == WindowState::Minimized as u32 => Some(WindowState::Minimized),
            v if v == WindowState::Fullscreen as u32 => Some(WindowState::Fullscreen),
            v if v == WindowState::MaximizedLeft as u32 => Some(WindowState::MaximizedLeft),
            v if v == WindowState::MaximizedRight as u32 => Some(WindowState::MaximizedRight),
            v if v == WindowState::MaximizedHorizontally as u32 => {
                Some(WindowState::MaximizedHorizontally)
            }
            v if v == WindowState::MaximizedVertically as u32 => {
                Some(WindowState::MaximizedVertically)
            }
            v if v == WindowState::MaximizedTopLeft as u32 => Some(WindowState::MaximizedTopLeft),
            v if v == WindowState::MaximizedTopRight as u32 => Some(WindowState::MaximizedTopRight),
            v if v == WindowState::MaximizedBottomLeft as u32 => {
                Some(WindowState::MaximizedBottomLeft)
            }
            v if v == WindowState::MaximizedBottomRight as u32 => {
                Some(WindowState::MaximizedBottomRight)
            }
            v if v == WindowState::Restored as u32 => Some(WindowState::Restored),
            _ => None,
        }
    }

    /// Projects this window state onto the compositor-side state vocabulary.
    ///
    /// `Normal` and `Restored` both collapse to [`SurfaceState::Restored`];
    /// the projection cannot be reversed.
    pub fn to_surface_state(self) -> SurfaceState {
        match self {
            WindowState::Maximized => SurfaceState::Maximized,
            WindowState::Minimized => SurfaceState::Minimized,
            WindowState::Fullscreen => SurfaceState::Fullscreen,
            WindowState::MaximizedLeft => SurfaceState::MaximizedLeft,
            WindowState::MaximizedRight => SurfaceState::MaximizedRight,
            WindowState::MaximizedHorizontally => SurfaceState::HorizMaximized,
            WindowState::MaximizedVertically => SurfaceState::VertMaximized,
            WindowState::MaximizedTopLeft => SurfaceState::MaximizedTopLeft,
            WindowState::MaximizedTopRight => SurfaceState::MaximizedTopRight,
            WindowState::MaximizedBottomLeft => SurfaceState::MaximizedBottomLeft,
            WindowState::MaximizedBottomRight => SurfaceState::MaximizedBottomRight,
            WindowState::Normal | WindowState::Restored => SurfaceState::Restored,
        }
    }
}

/// State of a surface as understood by the compositor side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceState {
    Restored,
    Maximized,
    Minimized,
    Fullscreen,
    MaximizedLeft,
    MaximizedRight,
    HorizMaximized,
    VertMaximized,
    MaximizedTopLeft,
    MaximizedTopRight,
    MaximizedBottomLeft,
    MaximizedBottomRight,
}

impl Default for SurfaceState {
    fn default() -> Self {
        SurfaceState::Restored
    }
}
