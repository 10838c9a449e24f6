//! Deliver values synchronously to a list of observers.
//!
//! An [`Emitter`] calls every observer, in subscription order, before
//! [`Emitter::emit`] returns. Observers may subscribe, unsubscribe or emit
//! again while being notified; each emission works on the observers that were
//! registered when it started.
//!
//! ```
//! use icy_context_menu_core::Emitter;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let emitter = Emitter::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let subscription = emitter.subscribe({
//!     let total = Rc::clone(&total);
//!     move |value: &u32| total.set(total.get() + value)
//! });
//!
//! emitter.emit(&2);
//! drop(subscription);
//! emitter.emit(&3);
//!
//! assert_eq!(total.get(), 2);
//! ```
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A synchronous observer list.
pub struct Emitter<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Emitter<T> {
    /// Creates an [`Emitter`] without observers.
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Registers an observer.
    ///
    /// The observer is removed when the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;

            listeners.next_id += 1;
            listeners.entries.push((id, Rc::new(f)));

            id
        };

        let listeners: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);

        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(listeners) = listeners.upgrade() {
                    listeners
                        .borrow_mut()
                        .entries
                        .retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Notifies every observer, in subscription order.
    pub fn emit(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }

    /// Returns the amount of registered observers.
    pub fn len(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.borrow().entries.len())
            .finish()
    }
}

/// A registration on an [`Emitter`].
///
/// Dropping it removes the observer.
#[must_use = "the observer is removed as soon as the subscription is dropped"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keeps the observer registered for as long as the [`Emitter`] lives.
    pub fn forget(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_in_subscription_order() {
        let emitter = Emitter::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = emitter.subscribe({
            let order = Rc::clone(&order);
            move |value: &char| order.borrow_mut().push((1, *value))
        });
        let second = emitter.subscribe({
            let order = Rc::clone(&order);
            move |value: &char| order.borrow_mut().push((2, *value))
        });

        emitter.emit(&'a');

        assert_eq!(*order.borrow(), vec![(1, 'a'), (2, 'a')]);

        drop(first);
        drop(second);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_reentrant_emit() {
        let emitter = Emitter::new();
        let count = Rc::new(Cell::new(0));

        let subscription = emitter.subscribe({
            let emitter = emitter.clone();
            let count = Rc::clone(&count);

            move |depth: &u32| {
                count.set(count.get() + 1);

                if *depth < 3 {
                    emitter.emit(&(depth + 1));
                }
            }
        });

        emitter.emit(&0);

        assert_eq!(count.get(), 4);
        drop(subscription);
    }

    #[test]
    fn test_forget_keeps_observer() {
        let emitter = Emitter::new();
        let count = Rc::new(Cell::new(0));

        emitter
            .subscribe({
                let count = Rc::clone(&count);
                move |_: &()| count.set(count.get() + 1)
            })
            .forget();

        emitter.emit(&());
        emitter.emit(&());

        assert_eq!(count.get(), 2);
        assert_eq!(emitter.len(), 1);
    }
}
