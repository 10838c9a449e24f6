//! Wire menus, triggers and the overlay provider together.
use crate::core::event::{self, Event};
use crate::core::{Point, Subscription};
use crate::menu::{ContextMenu, EventBus, MenuStack, OpenRequest};
use crate::overlay::{self, Overlay};

use smol_str::SmolStr;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The settings shared by every menu of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The class applied to every menu panel.
    pub panel_class: SmolStr,

    /// How many open requests may be delivered inside one another.
    pub max_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            panel_class: SmolStr::new_static("icy-context-menu"),
            max_depth: 16,
        }
    }
}

/// The services every menu of an application shares.
///
/// Create one per application and hand it to every [`ContextMenu`] and
/// trigger. Clones share the same stack, bus and overlay provider.
pub struct Services<T> {
    bus: EventBus<T>,
    stack: MenuStack<T>,
    overlay: Rc<RefCell<dyn Overlay>>,
    settings: Settings,
}

impl<T: Clone + 'static> Services<T> {
    /// Creates the [`Services`] of an application.
    pub fn new(overlay: impl Overlay + 'static, settings: Settings) -> Self {
        Self::shared(Rc::new(RefCell::new(overlay)), settings)
    }

    /// Creates the [`Services`] of an application around an overlay provider
    /// the caller keeps a handle to.
    pub fn shared(overlay: Rc<RefCell<dyn Overlay>>, settings: Settings) -> Self {
        Self {
            bus: EventBus::new(settings.max_depth),
            stack: MenuStack::new(),
            overlay,
            settings,
        }
    }

    /// Returns the bus open requests travel through.
    pub fn bus(&self) -> &EventBus<T> {
        &self.bus
    }

    /// Returns the stack of open levels.
    pub fn stack(&self) -> &MenuStack<T> {
        &self.stack
    }

    /// Returns the [`Settings`].
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Opens `menu` at the given position.
    pub fn show(&self, menu: &ContextMenu<T>, position: Point, value: Option<T>) {
        self.bus
            .show(OpenRequest::at_position(Some(menu.clone()), position, value));
    }

    /// Observes every open request until the [`Subscription`] is dropped.
    pub fn on_request(&self, f: impl Fn(&OpenRequest<T>) + 'static) -> Subscription {
        self.bus.subscribe(f)
    }

    /// Forwards an input event of the host to the open levels.
    ///
    /// Pointer events over a level only reach that level. Any other event
    /// reaches every level, root first, as long as it stays open.
    pub fn update(&self, event: &Event) -> event::Status {
        let levels: Vec<_> = self
            .stack
            .levels()
            .into_iter()
            .filter(|level| level.overlay().has_attached())
            .collect();

        let hit = event.as_mouse().and_then(|mouse_event| {
            levels
                .iter()
                .rev()
                .find(|level| level.bounds().contains(mouse_event.position()))
        });

        if let Some(level) = hit {
            return level.handle_event(event);
        }

        levels.iter().fold(event::Status::Ignored, |status, level| {
            if !level.overlay().has_attached() {
                return status;
            }

            status.merge(level.handle_event(event))
        })
    }

    pub(crate) fn create_overlay(
        &self,
        config: overlay::Config,
    ) -> Result<overlay::Handle, overlay::Error> {
        let surface = self.overlay.borrow_mut().create(config)?;

        Ok(overlay::Handle::new(surface))
    }
}

impl<T> Clone for Services<T> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
            stack: self.stack.clone(),
            overlay: Rc::clone(&self.overlay),
            settings: self.settings.clone(),
        }
    }
}

impl<T> fmt::Debug for Services<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("bus", &self.bus)
            .field("stack", &self.stack)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Headless;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.panel_class, "icy-context-menu");
        assert_eq!(settings.max_depth, 16);
    }

    #[test]
    fn test_clones_share_stack_and_bus() {
        let services = Services::<()>::new(Headless::default(), Settings::default());
        let clone = services.clone();

        let _subscription = clone.on_request(|_| {});

        assert_eq!(services.bus().len(), 1);
        assert!(services.stack().is_empty());
    }

    #[test]
    fn test_update_without_levels_is_ignored() {
        let services = Services::<()>::new(Headless::default(), Settings::default());

        let status = services.update(&Event::Mouse(crate::core::mouse::Event::Click {
            button: crate::core::mouse::Button::Left,
            position: Point::ORIGIN,
            target: None,
        }));

        assert_eq!(status, event::Status::Ignored);
    }
}
