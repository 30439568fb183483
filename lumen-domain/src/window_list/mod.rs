//! The top-level window list.
//!
//! [`TopLevelWindowList`] maintains the single ordered collection of
//! top-level windows the shell presents: one row per (application instance,
//! surface) pair, with placeholder rows for instances that are still
//! starting and have no surface yet.
//!
//! Rows carry a small integer id that stays stable across reorderings, so a
//! presentation layer can track an entry as it moves. Ids are drawn from a
//! bounded counter that wraps at [`MAX_WINDOW_ID`] and skips ids still held
//! by live rows; a freed id becomes eligible for reuse immediately.
//!
//! The list owns row order and membership exclusively. It monitors an
//! [`InstanceRegistry`] and each instance's surface list, and publishes
//! ordered [`ListChange`] events; it never mutates instances or surfaces.

use crate::application::{InstanceHandle, InstanceRegistry, SurfaceHandle};
use crate::signals::{Signal, Subscription};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use uuid::Uuid;


/// Ceiling for row ids. Far larger than any realistic window count, so the
/// wrap-and-skip id scan terminates quickly in practice.
pub const MAX_WINDOW_ID: u32 = 1_000_000;

/// A structural or content change to the window list.
///
/// Events are emitted in the exact order the mutations logically occur, and
/// a raise is observable as exactly one `Moved` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// Rows `first..=last` were inserted.
    Inserted { first: usize, last: usize },
    /// Rows `first..=last` were removed.
    Removed { first: usize, last: usize },
    /// The row at `from` now lives at `to`; all other rows keep their
    /// relative order.
    Moved { from: usize, to: usize },
    /// The row at `index` changed content (e.g. a placeholder gained its
    /// surface) without any structural change.
    Changed { index: usize },
}

/// Single-writer guard for structural mutation.
///
/// Row ids and positions must not be touched re-entrantly from a change
/// handler while an insert/remove/move is still being delivered; a mutation
/// attempted while the model is not `Idle` is rejected and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelState {
    Idle,
    Inserting,
    Removing,
    Moving,
    #[allow(dead_code)]
    Resetting,
}

/// One row of the model.
struct ModelEntry {
    /// `None` while the owning instance is still starting up (placeholder).
    surface: Option<SurfaceHandle>,
    /// The owning instance; never absent once the row exists.
    instance: InstanceHandle,
    /// Stable row id, unique among live rows.
    id: u32,
    /// Remove the row once its surface signals destruction. Set when
    /// removal is requested while a surface-destroy transition is still in
    /// flight.
    remove_once_surface_destroyed: bool,
    /// Subscriptions to the surface's closed/died signals; dropped with the
    /// row, so no callback outlives it.
    surface_subs: Vec<Subscription>,
}

struct Inner {
    entries: Vec<ModelEntry>,
    /// Cursor for id generation; rewound when a lower id is freed.
    next_id: u32,
    model_state: ModelState,
    /// Per monitored instance: subscriptions to its surface-list signals.
    instance_subs: Vec<(Uuid, Vec<Subscription>)>,
}

impl Inner {
    fn generate_id(&mut self) -> u32 {
        let id = self.next_free_id(self.next_id);
        self.next_id = if id >= MAX_WINDOW_ID { 1 } else { id + 1 };
        id
    }

    /// Linearly scans forward from `candidate`, wrapping at the ceiling,
    /// until an id no live row holds is found. Terminates because the live
    /// row count is far below the ceiling.
    fn next_free_id(&self, candidate: u32) -> u32 {
        let mut candidate = if candidate == 0 || candidate > MAX_WINDOW_ID {
            1
        } else {
            candidate
        };
        while self.entries.iter().any(|e| e.id == candidate) {
            candidate = if candidate >= MAX_WINDOW_ID { 1 } else { candidate + 1 };
        }
        candidate
    }

    fn index_of_surface(&self, surface: &SurfaceHandle) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.surface
                .as_ref()
                .map(|s| Rc::ptr_eq(s, surface))
                .unwrap_or(false)
        })
    }
}

#[derive(Clone)]
struct ListCore {
    inner: Rc<RefCell<Inner>>,
    changes: Signal<ListChange>,
}

#[derive(Clone)]
struct WeakCore {
    inner: Weak<RefCell<Inner>>,
    changes: Signal<ListChange>,
}

impl WeakCore {
    fn upgrade(&self) -> Option<ListCore> {
        self.inner.upgrade().map(|inner| ListCore {
            inner,
            changes: self.changes.clone(),
        })
    }
}

/// The ordered, row-stable model of top-level windows.
///
/// Constructed against an [`InstanceRegistry`]; collaborators are injected,
/// there is no ambient global state. Dropping the list releases every
/// registry, instance, and surface subscription it holds.
pub struct TopLevelWindowList {
    core: ListCore,
    _registry_subs: Vec<Subscription>,
}

impl TopLevelWindowList {
    /// Creates a list monitoring `registry`, picking up instances already
    /// registered at construction time.
    pub fn new(registry: &InstanceRegistry) -> Self {
        let core = ListCore {
            inner: Rc::new(RefCell::new(Inner {
                entries: Vec::new(),
                next_id: 1,
                model_state: ModelState::Idle,
                instance_subs: Vec::new(),
            })),
            changes: Signal::new(),
        };

        let weak = core.downgrade();
        let added_sub = registry.added().connect({
            let weak = weak.clone();
            move |instance: &InstanceHandle| {
                if let Some(core) = weak.upgrade() {
                    core.add_instance(instance);
                }
            }
        });
        let removed_sub = registry.removed().connect(move |instance: &InstanceHandle| {
            if let Some(core) = weak.upgrade() {
                core.remove_instance(instance);
            }
        });

        for instance in registry.instances() {
            core.add_instance(&instance);
        }

        TopLevelWindowList {
            core,
            _registry_subs: vec![added_sub, removed_sub],
        }
    }

    /// The stream of list changes, in mutation order.
    pub fn changes(&self) -> &Signal<ListChange> {
        &self.core.changes
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.core.inner.borrow().entries.len()
    }

    /// The surface at `index`; `None` for a placeholder row (instance still
    /// starting) or an out-of-range index.
    pub fn surface_at(&self, index: usize) -> Option<SurfaceHandle> {
        self.core
            .inner
            .borrow()
            .entries
            .get(index)
            .and_then(|e| e.surface.clone())
    }

    /// The owning application instance of the row at `index`.
    pub fn instance_at(&self, index: usize) -> Option<InstanceHandle> {
        self.core
            .inner
            .borrow()
            .entries
            .get(index)
            .map(|e| Rc::clone(&e.instance))
    }

    /// The stable id of the row at `index`.
    pub fn id_at(&self, index: usize) -> Option<u32> {
        self.core.inner.borrow().entries.get(index).map(|e| e.id)
    }

    /// The index of the row with the given id. `None` means the row is
    /// already gone; callers treat that as a normal negative result.
    pub fn index_for_id(&self, id: u32) -> Option<usize> {
        self.core
            .inner
            .borrow()
            .entries
            .iter()
            .position(|e| e.id == id)
    }

    /// The id the next created row will receive.
    #[cfg(test)]
    pub(crate) fn next_id(&self) -> u32 {
        let inner = self.core.inner.borrow();
        inner.next_free_id(inner.next_id)
    }

    /// Appends a placeholder row for a starting instance.
    ///
    /// Precondition: the instance has no surface yet and no existing row;
    /// violations are logged and ignored.
    pub fn append_placeholder(&self, instance: &InstanceHandle) {
        self.core.append_placeholder(instance);
    }

    /// Appends a row for `surface`, or fills the instance's placeholder row
    /// in place when one exists.
    pub fn append_surface(&self, surface: &SurfaceHandle, instance: &InstanceHandle) {
        self.core.append_surface(surface, instance);
    }

    /// Moves the row with the given id to the front as a single move event.
    ///
    /// A no-op when the id is unknown or the row is already at the front;
    /// both are deliberate idempotence, not errors.
    pub fn raise_id(&self, id: u32) {
        self.core.raise_id(id);
    }

    /// Removes the row at `index`. Its id becomes free for reuse.
    pub fn remove_at(&self, index: usize) {
        self.core.remove_at(index);
    }
}

impl ListCore {
    fn downgrade(&self) -> WeakCore {
        WeakCore {
            inner: Rc::downgrade(&self.inner),
            changes: self.changes.clone(),
        }
    }

    /// Enters a structural-mutation state, rejecting re-entrant attempts.
    fn begin(&self, state: ModelState) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.model_state != ModelState::Idle {
            warn!(
                requested = ?state,
                in_progress = ?inner.model_state,
                "Rejecting re-entrant window-list mutation"
            );
            return false;
        }
        inner.model_state = state;
        true
    }

    fn end(&self) {
        self.inner.borrow_mut().model_state = ModelState::Idle;
    }

    fn append_placeholder(&self, instance: &InstanceHandle) {
        if !instance.surfaces().is_empty() {
            warn!(app_id = %instance.app_id(), "Not appending placeholder: instance already has a surface");
            return;
        }
        if self
            .inner
            .borrow()
            .entries
            .iter()
            .any(|e| Rc::ptr_eq(&e.instance, instance))
        {
            warn!(app_id = %instance.app_id(), "Not appending placeholder: instance already has a row");
            return;
        }
        if !self.begin(ModelState::Inserting) {
            return;
        }
        let (index, id) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.generate_id();
            inner.entries.push(ModelEntry {
                surface: None,
                instance: Rc::clone(instance),
                id,
                remove_once_surface_destroyed: false,
                surface_subs: Vec::new(),
            });
            (inner.entries.len() - 1, id)
        };
        debug!(app_id = %instance.app_id(), id, index, "Appended placeholder row");
        self.changes.emit(&ListChange::Inserted { first: index, last: index });
        self.end();
    }

    fn append_surface(&self, surface: &SurfaceHandle, instance: &InstanceHandle) {
        if self.inner.borrow().index_of_surface(surface).is_some() {
            warn!(
                persistent_id = surface.persistent_id(),
                "Not appending surface: it already has a row"
            );
            return;
        }

        let placeholder = self.inner.borrow().entries.iter().position(|e| {
            e.surface.is_none() && Rc::ptr_eq(&e.instance, instance)
        });
        let subs = self.connect_surface(surface);

        match placeholder {
            Some(index) => {
                {
                    let mut inner = self.inner.borrow_mut();
                    let entry = &mut inner.entries[index];
                    entry.surface = Some(Rc::clone(surface));
                    entry.remove_once_surface_destroyed = false;
                    entry.surface_subs = subs;
                }
                debug!(
                    app_id = %instance.app_id(),
                    persistent_id = surface.persistent_id(),
                    index,
                    "Filled placeholder row with surface"
                );
                self.changes.emit(&ListChange::Changed { index });
            }
            None => {
                if !self.begin(ModelState::Inserting) {
                    return;
                }
                let (index, id) = {
                    let mut inner = self.inner.borrow_mut();
                    let id = inner.generate_id();
                    inner.entries.push(ModelEntry {
                        surface: Some(Rc::clone(surface)),
                        instance: Rc::clone(instance),
                        id,
                        remove_once_surface_destroyed: false,
                        surface_subs: subs,
                    });
                    (inner.entries.len() - 1, id)
                };
                debug!(
                    app_id = %instance.app_id(),
                    persistent_id = surface.persistent_id(),
                    id,
                    index,
                    "Appended surface row"
                );
                self.changes.emit(&ListChange::Inserted { first: index, last: index });
                self.end();
            }
        }
    }

    fn raise_id(&self, id: u32) {
        let index = {
            let inner = self.inner.borrow();
            inner.entries.iter().position(|e| e.id == id)
        };
        let index = match index {
            Some(i) if i > 0 => i,
            // Unknown id ("already gone") or already at the front.
            _ => return,
        };
        if !self.begin(ModelState::Moving) {
            return;
        }
        {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.remove(index);
            inner.entries.insert(0, entry);
        }
        debug!(id, from = index, "Raised row to front");
        self.changes.emit(&ListChange::Moved { from: index, to: 0 });
        self.end();
    }

    fn remove_at(&self, index: usize) {
        if !self.begin(ModelState::Removing) {
            return;
        }
        let removed = {
            let mut inner = self.inner.borrow_mut();
            if index >= inner.entries.len() {
                warn!(index, count = inner.entries.len(), "remove_at index out of range");
                None
            } else {
                let entry = inner.entries.remove(index);
                // Freed ids are promptly eligible again.
                if entry.id < inner.next_id {
                    inner.next_id = entry.id;
                }
                Some(entry)
            }
        };
        if let Some(entry) = removed {
            debug!(id = entry.id, index, "Removed row");
            // Drop surface subscriptions before observers run.
            drop(entry);
            self.changes.emit(&ListChange::Removed { first: index, last: index });
        }
        self.end();
    }

    fn connect_surface(&self, surface: &SurfaceHandle) -> Vec<Subscription> {
        let weak = self.downgrade();
        let weak_surface = Rc::downgrade(surface);
        let closed_sub = surface.closed().connect({
            let weak = weak.clone();
            let weak_surface = weak_surface.clone();
            move |_| {
                if let (Some(core), Some(surface)) = (weak.upgrade(), weak_surface.upgrade()) {
                    core.on_surface_gone(&surface);
                }
            }
        });
        let died_sub = surface.died().connect(move |_| {
            if let (Some(core), Some(surface)) = (weak.upgrade(), weak_surface.upgrade()) {
                core.on_surface_gone(&surface);
            }
        });
        vec![closed_sub, died_sub]
    }

    /// Handles both clean destruction and abnormal death of a surface; the
    /// two differ only in which signal fired.
    fn on_surface_gone(&self, surface: &SurfaceHandle) {
        let (index, deferred_remove) = {
            let inner = self.inner.borrow();
            match inner.index_of_surface(surface) {
                Some(i) => (i, inner.entries[i].remove_once_surface_destroyed),
                None => return,
            }
        };
        if deferred_remove {
            self.remove_at(index);
        } else {
            // The instance is still monitored and may bring up a replacement
            // window; keep the row as a placeholder to avoid flicker.
            {
                let mut inner = self.inner.borrow_mut();
                let entry = &mut inner.entries[index];
                entry.surface = None;
                entry.surface_subs.clear();
            }
            debug!(index, "Row reverted to placeholder after surface loss");
            self.changes.emit(&ListChange::Changed { index });
        }
    }

    /// A surface left its instance's surface list. If destruction is still
    /// in flight the row is flagged for removal; otherwise it goes now.
    fn on_surface_removed_from_instance(&self, surface: &SurfaceHandle) {
        let index = {
            let inner = self.inner.borrow();
            match inner.index_of_surface(surface) {
                Some(i) => i,
                None => return,
            }
        };
        if surface.live() {
            self.inner.borrow_mut().entries[index].remove_once_surface_destroyed = true;
        } else {
            self.remove_at(index);
        }
    }

    fn add_instance(&self, instance: &InstanceHandle) {
        let weak = self.downgrade();
        let weak_instance = Rc::downgrade(instance);
        let added_sub = instance.surfaces().added().connect({
            let weak = weak.clone();
            let weak_instance = weak_instance.clone();
            move |surface: &SurfaceHandle| {
                if let (Some(core), Some(instance)) = (weak.upgrade(), weak_instance.upgrade()) {
                    core.append_surface(surface, &instance);
                }
            }
        });
        let removed_sub = instance.surfaces().removed().connect(move |surface: &SurfaceHandle| {
            if let Some(core) = weak.upgrade() {
                core.on_surface_removed_from_instance(surface);
            }
        });
        self.inner
            .borrow_mut()
            .instance_subs
            .push((instance.instance_id(), vec![added_sub, removed_sub]));

        if instance.surfaces().is_empty() {
            self.append_placeholder(instance);
        } else {
            for i in 0..instance.surfaces().count() {
                if let Some(surface) = instance.surfaces().get(i) {
                    self.append_surface(&surface, instance);
                }
            }
        }
    }

    fn remove_instance(&self, instance: &InstanceHandle) {
        let subs = {
            let mut inner = self.inner.borrow_mut();
            let position = inner
                .instance_subs
                .iter()
                .position(|(id, _)| *id == instance.instance_id());
            position.map(|p| inner.instance_subs.remove(p))
        };
        drop(subs);

        // Placeholder rows and rows with dead surfaces go now; rows with
        // live surfaces are removed once the surface signals destruction.
        loop {
            let action = {
                let inner = self.inner.borrow();
                inner.entries.iter().enumerate().find_map(|(i, e)| {
                    if !Rc::ptr_eq(&e.instance, instance) {
                        return None;
                    }
                    match &e.surface {
                        None => Some((i, true)),
                        Some(s) if !s.live() => Some((i, true)),
                        Some(_) if !e.remove_once_surface_destroyed => Some((i, false)),
                        Some(_) => None,
                    }
                })
            };
            match action {
                Some((index, true)) => self.remove_at(index),
                Some((index, false)) => {
                    self.inner.borrow_mut().entries[index].remove_once_surface_destroyed = true;
                }
                None => break,
            }
        }
    }
}

impl std::fmt::Debug for TopLevelWindowList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.core.inner.borrow();
        let rows: Vec<String> = inner
            .entries
            .iter()
            .map(|e| {
                format!(
                    "(id={}, app={}, surface={})",
                    e.id,
                    e.instance.app_id(),
                    match &e.surface {
                        Some(s) => s.persistent_id().to_string(),
                        None => "<placeholder>".to_string(),
                    }
                )
            })
            .collect();
        f.debug_struct("TopLevelWindowList").field("rows", &rows).finish()
    }
}
