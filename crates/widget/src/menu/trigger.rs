//! Open menus from gestures over rendered nodes.
use crate::core::event::{self, Event};
use crate::core::{Shell, element, mouse};
use crate::menu::{ContextMenu, EventBus, OpenRequest, Services};

use std::fmt;

/// Opens a menu where a node is right clicked.
///
/// The host forwards the events that happen over the node.
pub struct ContextMenuTrigger<T> {
    bus: EventBus<T>,
    context_menu: Option<ContextMenu<T>>,
    value: Option<T>,
    tab_index: i32,
}

impl<T: Clone + 'static> ContextMenuTrigger<T> {
    /// Creates a [`ContextMenuTrigger`] without a menu.
    pub fn new(services: &Services<T>) -> Self {
        Self {
            bus: services.bus().clone(),
            context_menu: None,
            value: None,
            tab_index: 0,
        }
    }

    /// Sets the menu to open.
    #[must_use]
    pub fn context_menu(mut self, context_menu: ContextMenu<T>) -> Self {
        self.context_menu = Some(context_menu);
        self
    }

    /// Sets the context value handed to the menu.
    #[must_use]
    pub fn value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the tab index of the node.
    #[must_use]
    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = tab_index;
        self
    }

    /// Replaces the menu to open.
    pub fn set_context_menu(&mut self, context_menu: Option<ContextMenu<T>>) {
        self.context_menu = context_menu;
    }

    /// Replaces the context value.
    pub fn set_value(&mut self, value: Option<T>) {
        self.value = value;
    }

    /// Returns the tab index of the node.
    pub fn get_tab_index(&self) -> i32 {
        self.tab_index
    }

    /// Returns `true`; the node announces a popup.
    pub fn aria_has_popup(&self) -> bool {
        true
    }

    /// Publishes an open request when the context menu gesture fires over
    /// the node and the menu is enabled. The gesture is captured.
    pub fn update(&self, event: &Event, shell: &mut Shell<'_, OpenRequest<T>>) {
        let Event::Mouse(mouse::Event::ContextMenu { position, .. }) = event else {
            return;
        };

        let Some(context_menu) = self.enabled_menu() else {
            return;
        };

        shell.publish(OpenRequest::at_position(
            Some(context_menu),
            *position,
            self.value.clone(),
        ));
        shell.capture_event();
    }

    /// Processes an event, showing the resulting requests on the bus.
    pub fn handle_event(&self, event: &Event) -> event::Status {
        publish(&self.bus, event, |event, shell| self.update(event, shell))
    }

    fn enabled_menu(&self) -> Option<ContextMenu<T>> {
        self.context_menu
            .as_ref()
            .filter(|menu| !menu.is_disabled())
            .cloned()
    }
}

impl<T> fmt::Debug for ContextMenuTrigger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuTrigger")
            .field("context_menu", &self.context_menu)
            .field("tab_index", &self.tab_index)
            .finish_non_exhaustive()
    }
}

/// Opens a menu next to a node when the pointer enters it.
pub struct HoverTrigger<T> {
    bus: EventBus<T>,
    element: element::Id,
    context_menu: Option<ContextMenu<T>>,
    value: Option<T>,
}

impl<T: Clone + 'static> HoverTrigger<T> {
    /// Creates a [`HoverTrigger`] for the given node.
    pub fn new(services: &Services<T>, element: element::Id) -> Self {
        Self {
            bus: services.bus().clone(),
            element,
            context_menu: None,
            value: None,
        }
    }

    /// Sets the menu to open.
    #[must_use]
    pub fn context_menu(mut self, context_menu: ContextMenu<T>) -> Self {
        self.context_menu = Some(context_menu);
        self
    }

    /// Sets the context value handed to the menu.
    #[must_use]
    pub fn value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the node the trigger is attached to.
    pub fn element(&self) -> element::Id {
        self.element
    }

    /// Publishes an open request anchored to the node when the pointer
    /// enters it.
    pub fn update(&self, event: &Event, shell: &mut Shell<'_, OpenRequest<T>>) {
        let Event::Mouse(mouse::Event::Entered { .. }) = event else {
            return;
        };

        let Some(context_menu) = self
            .context_menu
            .as_ref()
            .filter(|menu| !menu.is_disabled())
        else {
            return;
        };

        shell.publish(OpenRequest::at_element(
            Some(context_menu.clone()),
            self.element,
            None,
            self.value.clone(),
        ));
    }

    /// Processes an event, showing the resulting requests on the bus.
    pub fn handle_event(&self, event: &Event) -> event::Status {
        publish(&self.bus, event, |event, shell| self.update(event, shell))
    }
}

impl<T> fmt::Debug for HoverTrigger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverTrigger")
            .field("element", &self.element)
            .field("context_menu", &self.context_menu)
            .finish_non_exhaustive()
    }
}

fn publish<T: 'static>(
    bus: &EventBus<T>,
    event: &Event,
    update: impl FnOnce(&Event, &mut Shell<'_, OpenRequest<T>>),
) -> event::Status {
    let mut requests = Vec::new();
    let mut shell = Shell::new(&mut requests);

    update(event, &mut shell);

    let status = shell.event_status();

    for request in requests {
        bus.show(request);
    }

    status
}
