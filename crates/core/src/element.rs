//! Identify the rendered nodes menus are anchored to.
use std::sync::atomic::{self, AtomicU64};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// The identifier of a rendered node, e.g. a menu row or a trigger.
///
/// Hosts map these to their own node handles. An overlay provider receives
/// them as anchors for element-relative positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(u64);

impl Id {
    /// Creates a new unique [`Id`].
    pub fn unique() -> Self {
        Self(NEXT_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }

    /// Returns the raw value of the [`Id`].
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// What kind of node an input event was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    /// A single-line text input.
    Input,

    /// A multi-line text area.
    TextArea,

    /// A select box.
    Select,

    /// Anything else.
    #[default]
    Other,
}

/// The node an input event was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// The node, when the host knows it.
    pub element: Option<Id>,

    /// The kind of node.
    pub tag: Tag,

    /// Whether the node accepts free text editing.
    pub content_editable: bool,
}

impl Target {
    /// Creates a [`Target`] for a plain, non-editable node.
    pub fn new(element: Id) -> Self {
        Self {
            element: Some(element),
            tag: Tag::Other,
            content_editable: false,
        }
    }

    /// Creates a [`Target`] for a node of the given [`Tag`].
    pub fn tagged(element: Id, tag: Tag) -> Self {
        Self {
            tag,
            ..Self::new(element)
        }
    }

    /// Creates a [`Target`] for a content-editable node.
    pub fn content_editable(element: Id) -> Self {
        Self {
            content_editable: true,
            ..Self::new(element)
        }
    }

    /// Returns `true` if keys aimed at this node must reach it untouched.
    pub fn is_editable(&self) -> bool {
        self.content_editable || matches!(self.tag, Tag::Input | Tag::TextArea | Tag::Select)
    }
}
