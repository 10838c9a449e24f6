//! Resolve a flag that is either fixed or computed from a context value.
//!
//! Menu items decide whether they are visible or disabled either once and
//! for all, or per opening, by looking at the value the menu was opened for.
//!
//! ```
//! use icy_context_menu_core::{Condition, evaluate};
//!
//! let read_only = Condition::predicate(|path: Option<&String>| {
//!     path.is_some_and(|path| path.ends_with(".lock"))
//! });
//!
//! assert!(evaluate(&read_only, Some(&String::from("Cargo.lock"))));
//! assert!(!evaluate(&read_only, None));
//! assert!(evaluate(&Condition::<String>::from(true), None));
//! ```
use std::fmt;
use std::rc::Rc;

/// A boolean that is either fixed or computed from an optional context value.
pub enum Condition<T> {
    /// A fixed boolean.
    Static(bool),

    /// A predicate over the current context value.
    Predicate(Rc<dyn Fn(Option<&T>) -> bool>),
}

impl<T> Condition<T> {
    /// Creates a [`Condition`] from the given predicate.
    pub fn predicate(f: impl Fn(Option<&T>) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(f))
    }
}

impl<T> Default for Condition<T> {
    fn default() -> Self {
        Self::Static(false)
    }
}

impl<T> Clone for Condition<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(*value),
            Self::Predicate(f) => Self::Predicate(Rc::clone(f)),
        }
    }
}

impl<T> From<bool> for Condition<T> {
    fn from(value: bool) -> Self {
        Self::Static(value)
    }
}

impl<T> fmt::Debug for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Evaluates the [`Condition`] against the given context.
///
/// Predicates run on every call; nothing is cached.
pub fn evaluate<T>(condition: &Condition<T>, context: Option<&T>) -> bool {
    match condition {
        Condition::Static(value) => *value,
        Condition::Predicate(f) => f(context),
    }
}
