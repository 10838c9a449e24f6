//! An in-memory overlay provider.
//!
//! [`Headless`] keeps track of every surface it creates without drawing
//! anything. Placement follows the first candidate position only. Each
//! surface is observable through a [`Probe`], which makes the provider a
//! convenient test double and a reference for real providers.
use crate::core::element;
use crate::core::{Alignment, Point, Rectangle, Size};
use crate::overlay::{Config, ConnectedPosition, Error, Origin, Overlay, OverlayRef};

use rustc_hash::FxHashMap;

use std::cell::RefCell;
use std::rc::Rc;

/// An overlay provider that keeps surfaces in memory.
#[derive(Debug)]
pub struct Headless {
    panel_size: Size,
    limit: Option<usize>,
    elements: Rc<RefCell<FxHashMap<element::Id, Rectangle>>>,
    surfaces: Vec<Probe>,
}

impl Headless {
    /// Creates a [`Headless`] provider whose surfaces have the given size.
    pub fn new(panel_size: Size) -> Self {
        Self {
            panel_size,
            limit: None,
            elements: Rc::new(RefCell::new(FxHashMap::default())),
            surfaces: Vec::new(),
        }
    }

    /// Refuses to create more than `limit` surfaces.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Records where a rendered node lives, for element-anchored surfaces.
    pub fn place(&mut self, element: element::Id, bounds: Rectangle) {
        let _ = self.elements.borrow_mut().insert(element, bounds);
    }

    /// Returns a [`Probe`] for every surface created so far, oldest first.
    pub fn surfaces(&self) -> &[Probe] {
        &self.surfaces
    }

    /// Returns the [`Probe`] of the most recent surface.
    pub fn last(&self) -> Option<&Probe> {
        self.surfaces.last()
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self::new(Size::new(240.0, 160.0))
    }
}

impl Overlay for Headless {
    fn create(&mut self, config: Config) -> Result<Box<dyn OverlayRef>, Error> {
        if let Some(limit) = self.limit
            && self.surfaces.len() >= limit
        {
            return Err(Error::Exhausted(limit));
        }

        let probe = Probe(Rc::new(RefCell::new(Surface {
            index: self.surfaces.len(),
            config,
            panel_size: self.panel_size,
            bounds: Rectangle::default(),
            attached: false,
            disposed: false,
            attach_count: 0,
            detach_count: 0,
            dispose_count: 0,
            position_updates: 0,
        })));

        probe.place(&self.elements.borrow());
        self.surfaces.push(probe.clone());

        Ok(Box::new(HeadlessRef {
            probe,
            elements: Rc::clone(&self.elements),
        }))
    }
}

#[derive(Debug)]
struct Surface {
    index: usize,
    config: Config,
    panel_size: Size,
    bounds: Rectangle,
    attached: bool,
    disposed: bool,
    attach_count: usize,
    detach_count: usize,
    dispose_count: usize,
    position_updates: usize,
}

/// An observer of a surface created by [`Headless`].
#[derive(Debug, Clone)]
pub struct Probe(Rc<RefCell<Surface>>);

impl Probe {
    /// Returns the creation index of the surface.
    pub fn index(&self) -> usize {
        self.0.borrow().index
    }

    /// Returns the [`Config`] the surface was created with.
    pub fn config(&self) -> Config {
        self.0.borrow().config.clone()
    }

    /// Returns the region the surface covers.
    pub fn bounds(&self) -> Rectangle {
        self.0.borrow().bounds
    }

    /// Returns `true` while the surface holds content.
    pub fn is_attached(&self) -> bool {
        self.0.borrow().attached
    }

    /// Returns `true` once the surface was released.
    pub fn is_disposed(&self) -> bool {
        self.0.borrow().disposed
    }

    /// Returns how many times content was attached.
    pub fn attach_count(&self) -> usize {
        self.0.borrow().attach_count
    }

    /// Returns how many times the surface was asked to detach.
    pub fn detach_count(&self) -> usize {
        self.0.borrow().detach_count
    }

    /// Returns how many times the surface was asked to dispose.
    pub fn dispose_count(&self) -> usize {
        self.0.borrow().dispose_count
    }

    /// Returns how many times the surface was repositioned.
    pub fn position_updates(&self) -> usize {
        self.0.borrow().position_updates
    }

    /// Drops the content behind the menus' back, like an outside click
    /// handled by the overlay host itself.
    pub fn detach_externally(&self) {
        self.0.borrow_mut().attached = false;
    }

    fn place(&self, elements: &FxHashMap<element::Id, Rectangle>) {
        let mut surface = self.0.borrow_mut();

        let origin = match surface.config.position_strategy.origin() {
            Origin::Point(point) => Rectangle::new(point, Size::ZERO),
            Origin::Element(element) => elements.get(&element).copied().unwrap_or_default(),
        };

        let position = surface
            .config
            .position_strategy
            .positions()
            .first()
            .copied();

        let top_left = match position {
            Some(position) => connect(origin, surface.panel_size, position),
            None => origin.position(),
        };

        surface.bounds = Rectangle::new(top_left, surface.panel_size);
    }
}

fn connect(origin: Rectangle, panel: Size, position: ConnectedPosition) -> Point {
    let along = |start: f32, length: f32, alignment: Alignment| match alignment {
        Alignment::Start => start,
        Alignment::Center => start + length / 2.0,
        Alignment::End => start + length,
    };

    let x = along(origin.x, origin.width, position.origin_x)
        - along(0.0, panel.width, position.overlay_x);
    let y = along(origin.y, origin.height, position.origin_y)
        - along(0.0, panel.height, position.overlay_y);

    Point::new(x, y)
}

struct HeadlessRef {
    probe: Probe,
    elements: Rc<RefCell<FxHashMap<element::Id, Rectangle>>>,
}

impl OverlayRef for HeadlessRef {
    fn attach(&mut self) {
        let mut surface = self.probe.0.borrow_mut();

        surface.attached = true;
        surface.attach_count += 1;
    }

    fn has_attached(&self) -> bool {
        self.probe.is_attached()
    }

    fn detach(&mut self) {
        let mut surface = self.probe.0.borrow_mut();

        surface.attached = false;
        surface.detach_count += 1;
    }

    fn dispose(&mut self) {
        let mut surface = self.probe.0.borrow_mut();

        surface.attached = false;
        surface.disposed = true;
        surface.dispose_count += 1;
    }

    fn update_position(&mut self) {
        self.probe.place(&self.elements.borrow());
        self.probe.0.borrow_mut().position_updates += 1;
    }

    fn bounds(&self) -> Rectangle {
        self.probe.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{PositionStrategy, ScrollStrategy};

    use smol_str::SmolStr;

    fn config(position_strategy: PositionStrategy) -> Config {
        Config {
            position_strategy,
            panel_class: SmolStr::new("menu"),
            scroll_strategy: ScrollStrategy::Close,
        }
    }

    #[test]
    fn test_point_placement_uses_first_candidate() {
        let mut overlay = Headless::new(Size::new(100.0, 50.0));

        let _surface = overlay
            .create(config(
                PositionStrategy::at_point(Point::new(20.0, 30.0)).with_positions([
                    ConnectedPosition::new(
                        Alignment::Start,
                        Alignment::End,
                        Alignment::Start,
                        Alignment::Start,
                    ),
                ]),
            ))
            .expect("create surface");

        let probe = overlay.last().expect("probe");

        assert_eq!(
            probe.bounds(),
            Rectangle::new(Point::new(20.0, 30.0), Size::new(100.0, 50.0))
        );
    }

    #[test]
    fn test_element_placement_next_to_row() {
        let mut overlay = Headless::new(Size::new(100.0, 50.0));
        let row = element::Id::unique();

        overlay.place(row, Rectangle::new(Point::new(0.0, 40.0), Size::new(80.0, 20.0)));

        let _surface = overlay
            .create(config(PositionStrategy::relative_to(row).with_positions([
                ConnectedPosition::new(
                    Alignment::End,
                    Alignment::Start,
                    Alignment::Start,
                    Alignment::Start,
                ),
            ])))
            .expect("create surface");

        assert_eq!(
            overlay.last().map(Probe::bounds),
            Some(Rectangle::new(Point::new(80.0, 40.0), Size::new(100.0, 50.0)))
        );
    }

    #[test]
    fn test_limit() {
        let mut overlay = Headless::default().with_limit(1);

        assert!(
            overlay
                .create(config(PositionStrategy::at_point(Point::ORIGIN)))
                .is_ok()
        );
        assert_eq!(
            overlay
                .create(config(PositionStrategy::at_point(Point::ORIGIN)))
                .err(),
            Some(Error::Exhausted(1))
        );
    }

    #[test]
    fn test_counts() {
        let mut overlay = Headless::default();
        let mut surface = overlay
            .create(config(PositionStrategy::at_point(Point::ORIGIN)))
            .expect("create surface");

        surface.attach();
        surface.update_position();
        surface.detach();
        surface.dispose();

        let probe = overlay.last().expect("probe");

        assert_eq!(probe.attach_count(), 1);
        assert_eq!(probe.position_updates(), 1);
        assert_eq!(probe.detach_count(), 1);
        assert_eq!(probe.dispose_count(), 1);
        assert!(probe.is_disposed());
    }
}
