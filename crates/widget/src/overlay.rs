//! Materialize floating surfaces through an overlay provider.
//!
//! Menus never measure or paint anything themselves. They describe where a
//! surface should go with a [`PositionStrategy`] and an ordered list of
//! [`ConnectedPosition`] candidates, and an [`Overlay`] provider creates the
//! surface. The provider picks the first candidate that fits.
pub mod headless;

pub use headless::{Headless, Probe};

use crate::core::element;
use crate::core::{Alignment, Point, Rectangle};

use smol_str::SmolStr;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{self, AtomicU64};

/// What a surface is positioned against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    /// A point in viewport coordinates.
    Point(Point),

    /// A rendered node.
    Element(element::Id),
}

/// A candidate placement of a surface against its origin.
///
/// The origin alignments pick a point on the origin, the overlay alignments
/// pick the point of the surface that is placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectedPosition {
    /// Horizontal point on the origin.
    pub origin_x: Alignment,
    /// Vertical point on the origin.
    pub origin_y: Alignment,
    /// Horizontal point on the surface.
    pub overlay_x: Alignment,
    /// Vertical point on the surface.
    pub overlay_y: Alignment,
}

impl ConnectedPosition {
    /// Creates a new [`ConnectedPosition`].
    pub const fn new(
        origin_x: Alignment,
        origin_y: Alignment,
        overlay_x: Alignment,
        overlay_y: Alignment,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            overlay_x,
            overlay_y,
        }
    }

    /// Returns the horizontally mirrored candidate.
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self {
            origin_x: self.origin_x.flip(),
            overlay_x: self.overlay_x.flip(),
            ..self
        }
    }
}

/// Where a surface goes, and the candidates to try, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionStrategy {
    origin: Origin,
    positions: Vec<ConnectedPosition>,
}

impl PositionStrategy {
    /// Positions a surface against a viewport point.
    pub fn at_point(point: Point) -> Self {
        Self {
            origin: Origin::Point(point),
            positions: Vec::new(),
        }
    }

    /// Positions a surface against a rendered node.
    pub fn relative_to(element: element::Id) -> Self {
        Self {
            origin: Origin::Element(element),
            positions: Vec::new(),
        }
    }

    /// Sets the candidate positions, in order of preference.
    #[must_use]
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = ConnectedPosition>) -> Self {
        self.positions = positions.into_iter().collect();
        self
    }

    /// Returns the [`Origin`] of the strategy.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns the candidate positions, in order of preference.
    pub fn positions(&self) -> &[ConnectedPosition] {
        &self.positions
    }
}

/// What happens to a surface when its container scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollStrategy {
    /// Nothing happens.
    #[default]
    Noop,

    /// The surface detaches.
    Close,

    /// The surface follows its origin.
    Reposition,
}

/// The configuration of a new surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the surface goes.
    pub position_strategy: PositionStrategy,

    /// The class applied to the surface panel.
    pub panel_class: SmolStr,

    /// What happens when the container scrolls.
    pub scroll_strategy: ScrollStrategy,
}

/// An error raised by an [`Overlay`] provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The overlay container is gone.
    #[error("the overlay container is not available")]
    Unavailable,

    /// The provider refuses to create more surfaces.
    #[error("overlay limit of {0} surfaces reached")]
    Exhausted(usize),
}

/// A provider of floating surfaces.
pub trait Overlay {
    /// Creates a new, empty surface.
    fn create(&mut self, config: Config) -> Result<Box<dyn OverlayRef>, Error>;
}

/// A surface created by an [`Overlay`] provider.
pub trait OverlayRef {
    /// Attaches content to the surface.
    fn attach(&mut self);

    /// Returns `true` while the surface holds content.
    fn has_attached(&self) -> bool;

    /// Removes the content of the surface.
    fn detach(&mut self);

    /// Releases the surface.
    fn dispose(&mut self);

    /// Recomputes the placement of the surface.
    fn update_position(&mut self);

    /// Returns the region the surface covers, in viewport coordinates.
    fn bounds(&self) -> Rectangle;
}

/// The identifier of a [`Handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(u64);

impl Id {
    /// Creates a new unique [`Id`].
    pub fn unique() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);

        Self(NEXT_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

type Teardown = Box<dyn FnOnce()>;

/// A shared handle to an [`OverlayRef`].
///
/// Two handles are equal when they point to the same surface. The teardown
/// registered on [`Handle::attach`] runs on the first [`Handle::detach`].
#[derive(Clone)]
pub struct Handle {
    id: Id,
    surface: Rc<RefCell<Box<dyn OverlayRef>>>,
    teardown: Rc<RefCell<Option<Teardown>>>,
}

impl Handle {
    /// Wraps a surface created by an [`Overlay`] provider.
    pub fn new(surface: Box<dyn OverlayRef>) -> Self {
        Self {
            id: Id::unique(),
            surface: Rc::new(RefCell::new(surface)),
            teardown: Rc::new(RefCell::new(None)),
        }
    }

    /// Returns the [`Id`] of the surface.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Attaches content, running `teardown` once the content is detached.
    pub fn attach(&self, teardown: impl FnOnce() + 'static) {
        self.surface.borrow_mut().attach();
        *self.teardown.borrow_mut() = Some(Box::new(teardown));
    }

    /// Returns `true` while the surface holds content.
    pub fn has_attached(&self) -> bool {
        self.surface.borrow().has_attached()
    }

    /// Removes the content of the surface.
    pub fn detach(&self) {
        self.surface.borrow_mut().detach();

        let teardown = self.teardown.borrow_mut().take();

        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// Releases the surface.
    pub fn dispose(&self) {
        self.surface.borrow_mut().dispose();
    }

    /// Recomputes the placement of the surface.
    pub fn update_position(&self) {
        self.surface.borrow_mut().update_position();
    }

    /// Returns the region the surface covers.
    pub fn bounds(&self) -> Rectangle {
        self.surface.borrow().bounds()
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handle {}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("attached", &self.has_attached())
            .finish()
    }
}
