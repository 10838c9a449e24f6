//! Shared, single-threaded menu state.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Reference-counted wrapper for state shared between menu parts.
///
/// Borrows are scoped to the closures given to [`RcWrapper::with_data`] and
/// [`RcWrapper::with_data_mut`]; callers must not call back into user code
/// from inside them.
pub(crate) struct RcWrapper<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for RcWrapper<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for RcWrapper<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> RcWrapper<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    pub(crate) fn with_data<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub(crate) fn with_data_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakWrapper<T> {
        WeakWrapper {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// A non-owning [`RcWrapper`].
pub(crate) struct WeakWrapper<T> {
    inner: Weak<RefCell<T>>,
}

impl<T> Clone for WeakWrapper<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakWrapper<T> {
    pub(crate) fn upgrade(&self) -> Option<RcWrapper<T>> {
        self.inner.upgrade().map(|inner| RcWrapper { inner })
    }
}
