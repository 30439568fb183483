//! Top-level surface entity.

use crate::signals::Signal;
use lumen_core::types::SurfaceState;
use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to a [`Surface`].
pub type SurfaceHandle = Rc<Surface>;

/// A top-level surface: the window-equivalent unit owned by an application
/// instance, as opposed to a child or popup surface.
///
/// The surface distinguishes clean teardown ([`Surface::destroy`]) from
/// abnormal termination ([`Surface::kill`]). Consumers that only care about
/// the surface going away subscribe to both [`Surface::closed`] and
/// [`Surface::died`].
pub struct Surface {
    persistent_id: String,
    live: Cell<bool>,
    state: Cell<SurfaceState>,
    state_changed: Signal<SurfaceState>,
    closed: Signal<()>,
    died: Signal<()>,
}

impl Surface {
    /// Creates a live surface with the given persistent identifier.
    ///
    /// The persistent id is the stable string key used for window-state
    /// persistence across sessions.
    pub fn new(persistent_id: impl Into<String>) -> SurfaceHandle {
        Rc::new(Surface {
            persistent_id: persistent_id.into(),
            live: Cell::new(true),
            state: Cell::new(SurfaceState::Restored),
            state_changed: Signal::new(),
            closed: Signal::new(),
            died: Signal::new(),
        })
    }

    pub fn persistent_id(&self) -> &str {
        &self.persistent_id
    }

    /// Whether the surface still exists on the compositor side.
    pub fn live(&self) -> bool {
        self.live.get()
    }

    pub fn state(&self) -> SurfaceState {
        self.state.get()
    }

    /// Requests a state change, notifying observers when the state differs.
    pub fn request_state(&self, state: SurfaceState) {
        if self.state.get() != state {
            self.state.set(state);
            self.state_changed.emit(&state);
        }
    }

    pub fn state_changed(&self) -> &Signal<SurfaceState> {
        &self.state_changed
    }

    /// Signal fired once on clean teardown.
    pub fn closed(&self) -> &Signal<()> {
        &self.closed
    }

    /// Signal fired once on abnormal termination.
    pub fn died(&self) -> &Signal<()> {
        &self.died
    }

    /// Marks the surface destroyed by clean teardown and notifies observers.
    ///
    /// Idempotent: a surface that is no longer live stays silent.
    pub fn destroy(&self) {
        if self.live.replace(false) {
            self.closed.emit(&());
        }
    }

    /// Marks the surface dead after abnormal termination and notifies
    /// observers. Idempotent like [`Surface::destroy`].
    pub fn kill(&self) {
        if self.live.replace(false) {
            self.died.emit(&());
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("persistent_id", &self.persistent_id)
            .field("live", &self.live.get())
            .field("state", &self.state.get())
            .finish()
    }
}
