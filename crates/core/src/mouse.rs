//! Listen to pointer events.
use crate::Point;
use crate::element::Target;

/// The button of a mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// The left mouse button.
    Left,

    /// The right mouse button.
    Right,

    /// The middle (wheel) button.
    Middle,

    /// The back mouse button.
    Back,

    /// The forward mouse button.
    Forward,

    /// Some other button.
    Other(u16),
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A button was clicked.
    Click {
        /// The button clicked.
        button: Button,

        /// The pointer position, in viewport coordinates.
        position: Point,

        /// The node under the pointer, if known.
        target: Option<Target>,
    },

    /// The context menu gesture fired (usually a right click).
    ContextMenu {
        /// The pointer position, in viewport coordinates.
        position: Point,

        /// The node under the pointer, if known.
        target: Option<Target>,
    },

    /// The pointer entered a node.
    Entered {
        /// The pointer position, in viewport coordinates.
        position: Point,

        /// The node entered.
        target: Option<Target>,
    },
}

impl Event {
    /// Returns the pointer position of the [`Event`].
    pub fn position(&self) -> Point {
        match self {
            Self::Click { position, .. }
            | Self::ContextMenu { position, .. }
            | Self::Entered { position, .. } => *position,
        }
    }

    /// Returns the [`Target`] of the [`Event`], if any.
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::Click { target, .. }
            | Self::ContextMenu { target, .. }
            | Self::Entered { target, .. } => *target,
        }
    }
}
