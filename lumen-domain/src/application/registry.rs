//! Observable registry of running application instances.

use crate::application::instance::InstanceHandle;
use crate::signals::Signal;
use std::cell::RefCell;
use std::rc::Rc;

/// An observable, ordered collection of running application instances.
///
/// This is the collaborator the top-level window list monitors: the window
/// model reacts to [`InstanceRegistry::added`] and
/// [`InstanceRegistry::removed`] and never mutates instances itself.
pub struct InstanceRegistry {
    items: RefCell<Vec<InstanceHandle>>,
    added: Signal<InstanceHandle>,
    removed: Signal<InstanceHandle>,
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceRegistry {
    pub fn new() -> Self {
        InstanceRegistry {
            items: RefCell::new(Vec::new()),
            added: Signal::new(),
            removed: Signal::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn get(&self, index: usize) -> Option<InstanceHandle> {
        self.items.borrow().get(index).cloned()
    }

    /// Snapshot of the instances in registry order.
    pub fn instances(&self) -> Vec<InstanceHandle> {
        self.items.borrow().clone()
    }

    /// Adds an instance and notifies observers.
    pub fn add(&self, instance: InstanceHandle) {
        self.items.borrow_mut().push(Rc::clone(&instance));
        self.added.emit(&instance);
    }

    /// Removes an instance (by identity) and notifies observers.
    ///
    /// Returns `false` when the instance is not registered.
    pub fn remove(&self, instance: &InstanceHandle) -> bool {
        let position = self
            .items
            .borrow()
            .iter()
            .position(|i| Rc::ptr_eq(i, instance));
        match position {
            Some(index) => {
                let removed = self.items.borrow_mut().remove(index);
                self.removed.emit(&removed);
                true
            }
            None => false,
        }
    }

    pub fn added(&self) -> &Signal<InstanceHandle> {
        &self.added
    }

    pub fn removed(&self) -> &Signal<InstanceHandle> {
        &self.removed
    }
}
