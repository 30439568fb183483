//! Synchronous signal/subscription mechanism.
//!
//! [`Signal`] delivers values to connected callbacks on the calling thread,
//! in connection order. [`Signal::connect`] returns a [`Subscription`] that
//! disconnects when dropped, so an owner that stores its subscriptions can
//! never receive a callback after it is gone.
//!
//! Emission tolerates re-entrancy: a callback may connect or disconnect
//! slots of the same signal, or emit the signal again. Callbacks connected
//! during an emission are not invoked for that emission.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Slot<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_key: u64,
    // A slot is `None` while its callback is checked out for delivery.
    entries: Vec<(u64, Option<Slot<T>>)>,
}

/// A single-threaded multicast signal.
///
/// Cloning a `Signal` yields another handle to the same set of slots, so an
/// object can hand out the signal for connecting while emitting through its
/// own handle.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Signal {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Signal {
            slots: Rc::new(RefCell::new(Slots {
                next_key: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Connects a callback, returning the handle that keeps it connected.
    #[must_use = "dropping the subscription disconnects the callback"]
    pub fn connect(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let key = {
            let mut slots = self.slots.borrow_mut();
            let key = slots.next_key;
            slots.next_key += 1;
            slots.entries.push((key, Some(Box::new(callback))));
            key
        };
        let weak = Rc::downgrade(&self.slots);
        Subscription::new(move || disconnect(&weak, key))
    }

    /// Delivers `value` to every callback connected at the start of the call.
    pub fn emit(&self, value: &T) {
        let keys: Vec<u64> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(key, _)| *key)
            .collect();
        for key in keys {
            // Check the callback out so a re-entrant emit or disconnect
            // cannot alias the mutable borrow.
            let checked_out = {
                let mut slots = self.slots.borrow_mut();
                slots
                    .entries
                    .iter_mut()
                    .find(|(k, _)| *k == key)
                    .and_then(|(_, slot)| slot.take())
            };
            if let Some(mut callback) = checked_out {
                callback(value);
                let mut slots = self.slots.borrow_mut();
                if let Some((_, slot)) = slots.entries.iter_mut().find(|(k, _)| *k == key) {
                    *slot = Some(callback);
                }
                // Entry missing: disconnected during delivery, drop it.
            }
        }
    }

    /// Number of currently connected callbacks.
    pub fn connection_count(&self) -> usize {
        self.slots.borrow().entries.len()
    }
}

fn disconnect<T: 'static>(slots: &Weak<RefCell<Slots<T>>>, key: u64) {
    if let Some(slots) = slots.upgrade() {
        slots.borrow_mut().entries.retain(|(k, _)| *k != key);
    }
}

/// RAII handle for a signal connection.
///
/// Dropping the handle disconnects the callback. [`Subscription::detach`]
/// leaks the connection for observers that live as long as the signal.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Keeps the callback connected for the signal's remaining lifetime.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("connected", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emits_to_all_connected_callbacks_in_order() {
        let signal = Signal::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_a = Rc::clone(&log);
        let log_b = Rc::clone(&log);
        let _sub_a = signal.connect(move |v: &i32| log_a.borrow_mut().push(("a", *v)));
        let _sub_b = signal.connect(move |v: &i32| log_b.borrow_mut().push(("b", *v)));
        signal.emit(&7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropping_subscription_disconnects() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let hits_cb = Rc::clone(&hits);
        let sub = signal.connect(move |_: &()| hits_cb.set(hits_cb.get() + 1));
        signal.emit(&());
        drop(sub);
        signal.emit(&());
        assert_eq!(hits.get(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn subscription_outliving_its_signal_is_inert() {
        let sub = {
            let signal: Signal<String> = Signal::new();
            signal.connect(|_| {})
        };
        // The signal is gone; dropping the handle must not panic.
        drop(sub);
    }

    #[test]
    fn detach_keeps_callback_alive() {
        let signal = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let hits_cb = Rc::clone(&hits);
        signal.connect(move |_: &()| hits_cb.set(hits_cb.get() + 1)).detach();
        signal.emit(&());
        signal.emit(&());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn disconnect_during_delivery_takes_effect_immediately() {
        let signal: Signal<()> = Signal::new();
        let later_hits = Rc::new(Cell::new(0));

        // First callback drops the second one's subscription mid-delivery.
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot_cb = Rc::clone(&slot);
        let _killer = signal.connect(move |_: &()| {
            slot_cb.borrow_mut().take();
        });
        let later_cb = Rc::clone(&later_hits);
        let victim = signal.connect(move |_: &()| later_cb.set(later_cb.get() + 1));
        *slot.borrow_mut() = Some(victim);

        signal.emit(&());
        assert_eq!(later_hits.get(), 0);
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn connect_during_delivery_misses_current_emission() {
        let signal: Signal<()> = Signal::new();
        let late_hits = Rc::new(Cell::new(0));
        let late_hits_outer = Rc::clone(&late_hits);
        let signal_inner = signal.clone();
        let keeper: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let keeper_cb = Rc::clone(&keeper);
        let _sub = signal.connect(move |_: &()| {
            let late_hits_inner = Rc::clone(&late_hits_outer);
            let sub = signal_inner.connect(move |_: &()| late_hits_inner.set(late_hits_inner.get() + 1));
            keeper_cb.borrow_mut().push(sub);
        });
        signal.emit(&());
        assert_eq!(late_hits.get(), 0);
        signal.emit(&());
        assert_eq!(late_hits.get(), 1);
    }
}
