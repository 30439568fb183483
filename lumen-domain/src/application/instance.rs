//! Application instance entity and its observable surface list.

use crate::application::surface::SurfaceHandle;
use crate::signals::Signal;
use lumen_core::types::AppIdentifier;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use uuid::Uuid;

/// Shared handle to an [`ApplicationInstance`].
pub type InstanceHandle = Rc<ApplicationInstance>;

/// Lifecycle state of a running application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceState {
    /// Launched, no surface yet.
    Starting,
    Running,
    Suspended,
    Stopped,
}

/// An observable, ordered collection of an instance's top-level surfaces.
///
/// An instance usually owns a single surface, but multi-window applications
/// own several; each gains its own row in the top-level window list.
pub struct SurfaceList {
    items: RefCell<Vec<SurfaceHandle>>,
    added: Signal<SurfaceHandle>,
    removed: Signal<SurfaceHandle>,
}

impl SurfaceList {
    fn new() -> Self {
        SurfaceList {
            items: RefCell::new(Vec::new()),
            added: Signal::new(),
            removed: Signal::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<SurfaceHandle> {
        self.items.borrow().get(index).cloned()
    }

    /// Appends a surface and notifies observers.
    pub fn append(&self, surface: SurfaceHandle) {
        self.items.borrow_mut().push(Rc::clone(&surface));
        self.added.emit(&surface);
    }

    /// Removes a surface (by identity) and notifies observers.
    ///
    /// Returns `false` when the surface is not in the list.
    pub fn remove(&self, surface: &SurfaceHandle) -> bool {
        let position = self
            .items
            .borrow()
            .iter()
            .position(|s| Rc::ptr_eq(s, surface));
        match position {
            Some(index) => {
                let removed = self.items.borrow_mut().remove(index);
                self.removed.emit(&removed);
                true
            }
            None => false,
        }
    }

    pub fn added(&self) -> &Signal<SurfaceHandle> {
        &self.added
    }

    pub fn removed(&self) -> &Signal<SurfaceHandle> {
        &self.removed
    }
}

/// A running instance of an application.
///
/// The instance is read-mostly for the window model: the model reacts to
/// state and surface-list notifications and never mutates the instance.
pub struct ApplicationInstance {
    instance_id: Uuid,
    app_id: AppIdentifier,
    state: Cell<InstanceState>,
    state_changed: Signal<InstanceState>,
    surfaces: SurfaceList,
}

impl ApplicationInstance {
    /// Creates an instance in the [`InstanceState::Starting`] state.
    pub fn new(app_id: AppIdentifier) -> InstanceHandle {
        Rc::new(ApplicationInstance {
            instance_id: Uuid::new_v4(),
            app_id,
            state: Cell::new(InstanceState::Starting),
            state_changed: Signal::new(),
            surfaces: SurfaceList::new(),
        })
    }

    /// Identity of this instance, stable for its lifetime and unique across
    /// instances of the same application.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn app_id(&self) -> &AppIdentifier {
        &self.app_id
    }

    pub fn state(&self) -> InstanceState {
        self.state.get()
    }

    /// Updates the lifecycle state, notifying observers on change.
    pub fn set_state(&self, state: InstanceState) {
        if self.state.get() != state {
            self.state.set(state);
            self.state_changed.emit(&state);
        }
    }

    pub fn state_changed(&self) -> &Signal<InstanceState> {
        &self.state_changed
    }

    pub fn surfaces(&self) -> &SurfaceList {
        &self.surfaces
    }
}

impl std::fmt::Debug for ApplicationInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationInstance")
            .field("instance_id", &self.instance_id)
            .field("app_id", &self.app_id)
            .field("state", &self.state.get())
            .field("surface_count", &self.surfaces.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::Surface;
    use std::cell::Cell;

    fn app(id: &str) -> AppIdentifier {
        AppIdentifier::new(id).unwrap()
    }

    #[test]
    fn surface_list_notifies_on_append_and_remove() {
        let instance = ApplicationInstance::new(app("gallery"));
        let adds = Rc::new(Cell::new(0));
        let removes = Rc::new(Cell::new(0));
        let adds_cb = Rc::clone(&adds);
        let removes_cb = Rc::clone(&removes);
        let _a = instance.surfaces().added().connect(move |_| adds_cb.set(adds_cb.get() + 1));
        let _r = instance
            .surfaces()
            .removed()
            .connect(move |_| removes_cb.set(removes_cb.get() + 1));

        let surface = Surface::new("gallery/0");
        instance.surfaces().append(Rc::clone(&surface));
        assert_eq!(instance.surfaces().count(), 1);
        assert!(instance.surfaces().remove(&surface));
        assert!(!instance.surfaces().remove(&surface));
        assert_eq!((adds.get(), removes.get()), (1, 1));
    }

    #[test]
    fn state_change_is_observable_and_deduplicated() {
        let instance = ApplicationInstance::new(app("dialer"));
        let changes = Rc::new(Cell::new(0));
        let changes_cb = Rc::clone(&changes);
        let _sub = instance
            .state_changed()
            .connect(move |_| changes_cb.set(changes_cb.get() + 1));
        instance.set_state(InstanceState::Running);
        instance.set_state(InstanceState::Running);
        assert_eq!(changes.get(), 1);
        assert_eq!(instance.state(), InstanceState::Running);
    }
}
