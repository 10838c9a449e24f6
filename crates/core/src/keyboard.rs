//! Listen to keyboard events.
use crate::element::Target;

use bitflags::bitflags;
use smol_str::SmolStr;

/// A key on the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key with an established name.
    Named(Named),

    /// A key string that corresponds to the character typed by the user.
    Character(SmolStr),

    /// An unidentified key.
    Unidentified,
}

impl Key {
    /// Returns the [`Named`] key, if any.
    pub fn as_named(&self) -> Option<Named> {
        match self {
            Self::Named(named) => Some(*named),
            Self::Character(_) | Self::Unidentified => None,
        }
    }
}

impl From<Named> for Key {
    fn from(named: Named) -> Self {
        Self::Named(named)
    }
}

/// A named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Named {
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    End,
    Enter,
    Escape,
    Home,
    Space,
    Tab,
}

bitflags! {
    /// The current state of the keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        /// The "shift" key.
        const SHIFT = 0b100;
        /// The "control" key.
        const CTRL = 0b100 << 3;
        /// The "alt" key.
        const ALT = 0b100 << 6;
        /// The "windows" key on Windows, "command" key on Mac, and
        /// "super" key on Linux.
        const LOGO = 0b100 << 9;
    }
}

/// A keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard key was pressed.
    KeyPressed {
        /// The key pressed.
        key: Key,

        /// The state of the modifier keys.
        modifiers: Modifiers,

        /// The node that had focus, if known.
        target: Option<Target>,
    },
}

impl Event {
    /// Creates a [`Event::KeyPressed`] for a named key without modifiers.
    pub fn pressed(named: Named, target: Option<Target>) -> Self {
        Self::KeyPressed {
            key: Key::Named(named),
            modifiers: Modifiers::empty(),
            target,
        }
    }
}
