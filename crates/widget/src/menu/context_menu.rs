//! A context menu is a menu in a graphical user interface that appears upon
//! user interaction, such as a right-click mouse operation.
//!
//! A [`ContextMenu`] declares items and listens to the bus of its
//! [`Services`]. When an open request is meant for it, it creates a surface
//! through the overlay provider, puts a [`MenuLevel`] in it and pushes both
//! on the stack. It then turns the intents of the level into stack
//! operations, or into new requests when a submenu opens.
use crate::core::{Emitter, LayoutDirection, Subscription};
use crate::menu::position;
use crate::menu::stack::Entry;
use crate::menu::state::{RcWrapper, WeakWrapper};
use crate::menu::{Anchor, Intent, MenuItem, MenuLevel, OpenRequest, Services};
use crate::overlay::{self, PositionStrategy, ScrollStrategy};

use smol_str::SmolStr;

use std::fmt;

/// Why the whole chain closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseReason {
    Execute,
    Cancel,
}

struct State<T> {
    services: Services<T>,
    items: Vec<MenuItem<T>>,
    visible_items: Vec<MenuItem<T>>,
    value: Option<T>,
    disabled: bool,
    menu_class: SmolStr,
    dir: Option<LayoutDirection>,
    open: Emitter<OpenRequest<T>>,
    close: Emitter<()>,
    requests: Option<Subscription>,
}

/// A declared menu, opened by the requests meant for it.
///
/// Clones are handles to the same menu; requests and submenu links refer to
/// a menu through them.
pub struct ContextMenu<T> {
    state: RcWrapper<State<T>>,
}

impl<T: Clone + 'static> ContextMenu<T> {
    /// Creates a [`ContextMenu`] with the given items and starts listening
    /// to open requests.
    pub fn new(services: &Services<T>, items: impl IntoIterator<Item = MenuItem<T>>) -> Self {
        let menu = Self {
            state: RcWrapper::new(State {
                services: services.clone(),
                items: items.into_iter().collect(),
                visible_items: Vec::new(),
                value: None,
                disabled: false,
                menu_class: SmolStr::default(),
                dir: None,
                open: Emitter::new(),
                close: Emitter::new(),
                requests: None,
            }),
        };

        let weak = menu.downgrade();

        let requests = services.bus().subscribe(move |request| {
            if let Some(menu) = weak.upgrade() {
                menu.on_menu_event(request);
            }
        });

        menu.state
            .with_data_mut(|state| state.requests = Some(requests));

        menu
    }

    /// Sets whether the menu ignores open requests.
    #[must_use]
    pub fn disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Sets the class of the menu panels.
    #[must_use]
    pub fn menu_class(self, menu_class: impl Into<SmolStr>) -> Self {
        self.set_menu_class(menu_class);
        self
    }

    /// Sets the direction of the menu.
    #[must_use]
    pub fn dir(self, dir: LayoutDirection) -> Self {
        self.set_dir(Some(dir));
        self
    }

    /// Sets whether the menu ignores open requests.
    pub fn set_disabled(&self, disabled: bool) {
        self.state.with_data_mut(|state| state.disabled = disabled);
    }

    /// Sets the class of the menu panels.
    pub fn set_menu_class(&self, menu_class: impl Into<SmolStr>) {
        let menu_class = menu_class.into();

        self.state
            .with_data_mut(|state| state.menu_class = menu_class);
    }

    /// Sets the direction of the menu, or lets it inherit one.
    pub fn set_dir(&self, dir: Option<LayoutDirection>) {
        self.state.with_data_mut(|state| state.dir = dir);
    }

    /// Appends an item.
    pub fn push_item(&self, item: MenuItem<T>) {
        self.state.with_data_mut(|state| state.items.push(item));
    }

    /// Returns `true` if the menu ignores open requests.
    pub fn is_disabled(&self) -> bool {
        self.state.with_data(|state| state.disabled)
    }

    /// Returns the class of the menu panels.
    pub fn get_menu_class(&self) -> SmolStr {
        self.state.with_data(|state| state.menu_class.clone())
    }

    /// Returns the direction of the menu, if set.
    pub fn get_dir(&self) -> Option<LayoutDirection> {
        self.state.with_data(|state| state.dir)
    }

    /// Returns the declared items.
    pub fn items(&self) -> Vec<MenuItem<T>> {
        self.state.with_data(|state| state.items.clone())
    }

    /// Returns the items shown by the last opening, in declaration order.
    pub fn visible_items(&self) -> Vec<MenuItem<T>> {
        self.state.with_data(|state| state.visible_items.clone())
    }

    /// Returns the context value of the last opening.
    pub fn value(&self) -> Option<T> {
        self.state.with_data(|state| state.value.clone())
    }

    /// Observes the openings of the menu until the [`Subscription`] is
    /// dropped.
    pub fn on_open(&self, f: impl Fn(&OpenRequest<T>) + 'static) -> Subscription {
        self.state.with_data(|state| state.open.subscribe(f))
    }

    /// Observes the closings of the menu's levels until the [`Subscription`]
    /// is dropped.
    pub fn on_close(&self, f: impl Fn() + 'static) -> Subscription {
        self.state.with_data(|state| state.close.subscribe(move |_| f()))
    }

    /// Opens a level of the menu for the given request.
    ///
    /// A request anchored to a position closes every open level first. A
    /// request anchored to an element only closes the submenus of its parent
    /// level.
    pub fn open_context_menu(
        &self,
        request: &OpenRequest<T>,
    ) -> Result<MenuLevel<T>, overlay::Error> {
        let (services, items, own_dir, own_class) = self.state.with_data(|state| {
            (
                state.services.clone(),
                state.visible_items.clone(),
                state.dir,
                state.menu_class.clone(),
            )
        });

        let parent = request.parent();
        let dir = LayoutDirection::inherit(own_dir, parent.and_then(MenuLevel::dir));

        let menu_class = if own_class.is_empty() {
            parent.map(MenuLevel::menu_class).unwrap_or_default()
        } else {
            own_class
        };

        let position_strategy = match &request.anchor {
            Anchor::Position(point) => {
                self.close_all(&services, CloseReason::Cancel);

                PositionStrategy::at_point(*point)
                    .with_positions(position::at_point(LayoutDirection::resolve(own_dir)))
            }
            Anchor::Element { element, parent } => {
                services.stack().destroy_sub_menus(parent.as_ref());

                PositionStrategy::relative_to(*element)
                    .with_positions(position::next_to_element(LayoutDirection::resolve(dir)))
            }
        };

        let surface = services.create_overlay(overlay::Config {
            position_strategy,
            panel_class: services.settings().panel_class.clone(),
            scroll_strategy: ScrollStrategy::Close,
        })?;

        let level = MenuLevel::new(items, request.value.clone(), surface.clone(), dir, menu_class);

        services.stack().push(Entry {
            overlay: surface.clone(),
            level: level.clone(),
        });

        self.attach(&surface, &level);
        surface.update_position();

        Ok(level)
    }

    fn on_menu_event(&self, request: &OpenRequest<T>) {
        if self.is_disabled() {
            log::trace!("Open request ignored by disabled menu");
            return;
        }

        if let Some(target) = &request.context_menu
            && target != self
        {
            return;
        }

        let visible_items: Vec<_> = self
            .items()
            .into_iter()
            .filter(|item| item.is_visible_for(request.value.as_ref()))
            .collect();

        self.state.with_data_mut(|state| {
            state.value = request.value.clone();
            state.visible_items = visible_items;
        });

        match self.open_context_menu(request) {
            Ok(_) => {
                let open = self.state.with_data(|state| state.open.clone());
                open.emit(request);
            }
            Err(error) => {
                log::warn!("Context menu not opened: {error}");
            }
        }
    }

    fn attach(&self, surface: &overlay::Handle, level: &MenuLevel<T>) {
        let intents = level.subscribe({
            let menu = self.downgrade();
            let level = level.downgrade();

            move |intent| {
                if let (Some(menu), Some(level)) = (menu.upgrade(), level.upgrade()) {
                    menu.on_intent(&level, intent);
                }
            }
        });

        let menu = self.downgrade();
        let items = level.items();

        surface.attach(move || {
            if let Some(menu) = menu.upgrade() {
                menu.emit_close();
            }

            for item in &items {
                item.set_active(false);
            }

            drop(intents);
        });
    }

    fn on_intent(&self, level: &MenuLevel<T>, intent: &Intent<T>) {
        let services = self.services();

        match intent {
            Intent::Execute { .. } => {
                self.close_all(&services, CloseReason::Execute);
            }
            Intent::CloseAllMenus => {
                self.close_all(&services, CloseReason::Cancel);
            }
            Intent::CloseLeafMenu { exclude_root_menu } => {
                if services.stack().close_leaf_menu(*exclude_root_menu) {
                    log::debug!("Menu chain collapsed: {:?}", CloseReason::Cancel);

                    if let Some(parent) = services.stack().last() {
                        parent.set_leaf(true);
                    }

                    self.emit_close();
                }
            }
            Intent::OpenSubMenu(request) => {
                services.stack().destroy_sub_menus(Some(level));

                if request.context_menu.is_none() {
                    level.set_leaf(true);
                    return;
                }

                level.set_leaf(false);
                services.bus().show(request.clone());
            }
        }
    }

    fn close_all(&self, services: &Services<T>, reason: CloseReason) {
        if !services.stack().is_empty() {
            log::debug!("Closing all menus: {reason:?}");
        }

        services.stack().close_all();
    }

    fn emit_close(&self) {
        let close = self.state.with_data(|state| state.close.clone());

        close.emit(&());
    }

    fn services(&self) -> Services<T> {
        self.state.with_data(|state| state.services.clone())
    }
}

impl<T> ContextMenu<T> {
    fn downgrade(&self) -> WeakContextMenu<T> {
        WeakContextMenu {
            state: self.state.downgrade(),
        }
    }
}

struct WeakContextMenu<T> {
    state: WeakWrapper<State<T>>,
}

impl<T> WeakContextMenu<T> {
    fn upgrade(&self) -> Option<ContextMenu<T>> {
        self.state.upgrade().map(|state| ContextMenu { state })
    }
}

impl<T> Clone for ContextMenu<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> PartialEq for ContextMenu<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state.ptr_eq(&other.state)
    }
}

impl<T> fmt::Debug for ContextMenu<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.with_data(|state| {
            f.debug_struct("ContextMenu")
                .field("items", &state.items.len())
                .field("visible_items", &state.visible_items.len())
                .field("disabled", &state.disabled)
                .field("menu_class", &state.menu_class)
                .field("dir", &state.dir)
                .finish()
        })
    }
}
