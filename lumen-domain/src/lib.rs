//! # Lumen Domain Library (`lumen-domain`)
//!
//! The domain layer of the Lumen shell stack. It owns the shell's window
//! model and its durable state:
//!
//! - [`window_list`]: the ordered, row-stable [`TopLevelWindowList`] of
//!   top-level windows, with placeholder rows for starting applications,
//!   stable row ids, and raise-to-front reordering.
//! - [`application`]: the application-instance registry the window list
//!   monitors, with observable per-instance surface lists.
//! - [`window_state`]: the SQLite-backed [`WindowStateStore`] persisting
//!   window geometry, state, and stage across restarts.
//! - [`signals`]: the synchronous subscription mechanism tying the above
//!   together with scoped-lifetime [`signals::Subscription`] handles.
//!
//! List-model mutation is single-threaded and signal-driven; the window
//! state store's background writer is the only asynchronous boundary.

pub mod application;
pub mod signals;
pub mod window_list;
pub mod window_state;

pub use application::{
    ApplicationInstance, InstanceHandle, InstanceRegistry, InstanceState, Surface, SurfaceHandle,
    SurfaceList,
};
pub use signals::{Signal, Subscription};
pub use window_list::{ListChange, TopLevelWindowList, MAX_WINDOW_ID};
pub use window_state::{WindowStateError, WindowStateStore};
