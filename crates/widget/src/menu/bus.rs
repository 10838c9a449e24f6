//! Broadcast open requests from triggers to menus.
use crate::core::{Emitter, Point, Subscription, element};
use crate::menu::{ContextMenu, MenuLevel};

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// What a new menu surface is anchored to.
#[derive(Debug, Clone)]
pub enum Anchor<T> {
    /// A point in viewport coordinates. Opening there starts a new chain.
    Position(Point),

    /// A rendered node, usually the row of a parent level.
    Element {
        /// The node to open next to.
        element: element::Id,

        /// The level opening the menu, if any.
        parent: Option<MenuLevel<T>>,
    },
}

/// A request to open a menu.
#[derive(Debug, Clone)]
pub struct OpenRequest<T> {
    /// The context value, handed unchanged to every item of the menu.
    pub value: Option<T>,

    /// The menu to open. Every enabled menu answers when absent.
    pub context_menu: Option<ContextMenu<T>>,

    /// Where the menu opens.
    pub anchor: Anchor<T>,
}

impl<T> OpenRequest<T> {
    /// Creates a request anchored to a point.
    pub fn at_position(
        context_menu: Option<ContextMenu<T>>,
        position: Point,
        value: Option<T>,
    ) -> Self {
        Self {
            value,
            context_menu,
            anchor: Anchor::Position(position),
        }
    }

    /// Creates a request anchored to a rendered node.
    pub fn at_element(
        context_menu: Option<ContextMenu<T>>,
        element: element::Id,
        parent: Option<MenuLevel<T>>,
        value: Option<T>,
    ) -> Self {
        Self {
            value,
            context_menu,
            anchor: Anchor::Element { element, parent },
        }
    }

    /// Returns the level opening the menu, if any.
    pub fn parent(&self) -> Option<&MenuLevel<T>> {
        match &self.anchor {
            Anchor::Position(_) => None,
            Anchor::Element { parent, .. } => parent.as_ref(),
        }
    }
}

/// The channel open requests travel through.
///
/// Requests are delivered synchronously, in subscription order. The bus
/// never filters; each menu decides whether a request is meant for it.
pub struct EventBus<T> {
    requests: Emitter<OpenRequest<T>>,
    depth: Rc<Cell<usize>>,
    max_depth: usize,
}

impl<T: 'static> EventBus<T> {
    /// Creates an [`EventBus`] that refuses to nest more than `max_depth`
    /// deliveries.
    pub fn new(max_depth: usize) -> Self {
        Self {
            requests: Emitter::new(),
            depth: Rc::new(Cell::new(0)),
            max_depth,
        }
    }

    /// Publishes a request to every subscriber.
    pub fn show(&self, request: OpenRequest<T>) {
        let depth = self.depth.get();

        if depth >= self.max_depth {
            log::error!("Open request dropped: bus nested {depth} deliveries deep");
            return;
        }

        self.depth.set(depth + 1);
        self.requests.emit(&request);
        self.depth.set(depth);
    }

    /// Observes requests until the [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&OpenRequest<T>) + 'static) -> Subscription {
        self.requests.subscribe(f)
    }

    /// Returns the amount of subscribers.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if nobody listens.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            depth: Rc::clone(&self.depth),
            max_depth: self.max_depth,
        }
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("requests", &self.requests)
            .field("depth", &self.depth.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_delivery_in_subscription_order() {
        let bus = EventBus::<u8>::new(4);
        let order = Rc::new(RefCell::new(Vec::new()));

        let _first = bus.subscribe({
            let order = Rc::clone(&order);
            move |request| order.borrow_mut().push((1, request.value))
        });
        let _second = bus.subscribe({
            let order = Rc::clone(&order);
            move |request| order.borrow_mut().push((2, request.value))
        });

        bus.show(OpenRequest::at_position(None, Point::ORIGIN, Some(9)));

        assert_eq!(*order.borrow(), vec![(1, Some(9)), (2, Some(9))]);
    }

    #[test]
    fn test_depth_guard_stops_recursion() {
        let bus = EventBus::<u8>::new(3);
        let deliveries = Rc::new(Cell::new(0));

        let _subscription = bus.subscribe({
            let bus = bus.clone();
            let deliveries = Rc::clone(&deliveries);

            move |request| {
                deliveries.set(deliveries.get() + 1);
                bus.show(request.clone());
            }
        });

        bus.show(OpenRequest::at_position(None, Point::ORIGIN, None));

        assert_eq!(deliveries.get(), 3);
    }
}
