//! Handle events of a user interface.
use crate::element::Target;
use crate::keyboard;
use crate::mouse;

/// A user interface event, as forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event
    Keyboard(keyboard::Event),

    /// A mouse event
    Mouse(mouse::Event),
}

impl Event {
    /// Returns the [`Target`] the [`Event`] was dispatched to, if any.
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::Keyboard(keyboard::Event::KeyPressed { target, .. }) => *target,
            Self::Mouse(event) => event.target(),
        }
    }

    /// Returns the [`mouse::Event`], if this is one.
    pub fn as_mouse(&self) -> Option<&mouse::Event> {
        match self {
            Self::Mouse(event) => Some(event),
            Self::Keyboard(_) => None,
        }
    }

    /// Returns `true` if this is a keyboard event.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Self::Keyboard(_))
    }
}

impl From<keyboard::Event> for Event {
    fn from(event: keyboard::Event) -> Self {
        Self::Keyboard(event)
    }
}

impl From<mouse::Event> for Event {
    fn from(event: mouse::Event) -> Self {
        Self::Mouse(event)
    }
}

/// The status of an [`Event`] after being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// The [`Event`] was **NOT** handled.
    #[default]
    Ignored,

    /// The [`Event`] was handled; its default action is cancelled and it
    /// must not propagate further.
    Captured,
}

impl Status {
    /// Merges two [`Status`] into one.
    ///
    /// `Captured` takes precedence over `Ignored`:
    ///
    /// ```
    /// use icy_context_menu_core::event::Status;
    ///
    /// assert_eq!(Status::Ignored.merge(Status::Ignored), Status::Ignored);
    /// assert_eq!(Status::Ignored.merge(Status::Captured), Status::Captured);
    /// assert_eq!(Status::Captured.merge(Status::Ignored), Status::Captured);
    /// assert_eq!(Status::Captured.merge(Status::Captured), Status::Captured);
    /// ```
    pub fn merge(self, b: Self) -> Self {
        match self {
            Status::Ignored => b,
            Status::Captured => Status::Captured,
        }
    }
}
