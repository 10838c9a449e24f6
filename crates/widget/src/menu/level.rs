//! A rendered level of an open menu chain.
//!
//! A [`MenuLevel`] turns input events into [`Intent`]s. It never touches the
//! stack or the bus itself; the menu that opened it reacts to its intents.
//!
//! Only the leaf level, the deepest one, reacts to the keyboard:
//!
//! | Key | Left to right | Right to left |
//! |-----|---------------|---------------|
//! | `ArrowDown` / `ArrowUp` | move the active mark | move the active mark |
//! | `ArrowRight` | open the active submenu | close this level |
//! | `ArrowLeft` | close this level | open the active submenu |
//! | `Enter` / `Space` | select the active item | select the active item |
//! | `Escape` | close this level | close this level |
//!
//! Keys aimed at an editable node are left alone.
use crate::core::element::{self, Target};
use crate::core::event::{self, Event};
use crate::core::keyboard::{self, Key, Named};
use crate::core::mouse;
use crate::core::{Emitter, LayoutDirection, Rectangle, Shell, Subscription};
use crate::focus::KeyManager;
use crate::menu::state::{RcWrapper, WeakWrapper};
use crate::menu::{MenuItem, OpenRequest};
use crate::overlay;

use smol_str::SmolStr;

use std::fmt;

/// What a [`MenuLevel`] asks its menu to do.
#[derive(Debug, Clone)]
pub enum Intent<T> {
    /// An item was executed.
    Execute {
        /// The executed item.
        item: MenuItem<T>,

        /// The event that selected the item.
        event: Event,

        /// The context value of the level.
        value: Option<T>,
    },

    /// A submenu should open.
    OpenSubMenu(OpenRequest<T>),

    /// The leaf level should close.
    CloseLeafMenu {
        /// Keep the root level open.
        exclude_root_menu: bool,
    },

    /// The whole chain should close.
    CloseAllMenus,
}

struct State<T> {
    keys: KeyManager<MenuItem<T>>,
    rows: Vec<element::Id>,
    value: Option<T>,
    dir: Option<LayoutDirection>,
    menu_class: SmolStr,
    overlay: overlay::Handle,
    is_leaf: bool,
    intents: Emitter<Intent<T>>,
}

/// A rendered level of a menu.
///
/// Every visible item gets a row, identified by an [`element::Id`] the host
/// uses for the rendered node. Submenus are anchored to these rows.
pub struct MenuLevel<T> {
    state: RcWrapper<State<T>>,
}

impl<T> MenuLevel<T> {
    /// Returns the surface holding the level.
    pub fn overlay(&self) -> overlay::Handle {
        self.state.with_data(|state| state.overlay.clone())
    }

    /// Returns the region the level covers.
    pub fn bounds(&self) -> Rectangle {
        self.overlay().bounds()
    }

    /// Returns `true` if no submenu is open above the level.
    pub fn is_leaf(&self) -> bool {
        self.state.with_data(|state| state.is_leaf)
    }

    pub(crate) fn set_leaf(&self, is_leaf: bool) {
        self.state.with_data_mut(|state| state.is_leaf = is_leaf);
    }

    /// Returns the direction set on the level, if any.
    pub fn dir(&self) -> Option<LayoutDirection> {
        self.state.with_data(|state| state.dir)
    }

    /// Returns the direction the level is laid out in.
    pub fn direction(&self) -> LayoutDirection {
        LayoutDirection::resolve(self.dir())
    }

    /// Returns the class of the level's panel.
    pub fn menu_class(&self) -> SmolStr {
        self.state.with_data(|state| state.menu_class.clone())
    }

    /// Returns the row nodes, in item order.
    pub fn rows(&self) -> Vec<element::Id> {
        self.state.with_data(|state| state.rows.clone())
    }

    /// Returns the row node of the item at `index`.
    pub fn row_element(&self, index: usize) -> Option<element::Id> {
        self.state.with_data(|state| state.rows.get(index).copied())
    }

    /// Returns the index of the active item.
    pub fn active_item_index(&self) -> Option<usize> {
        self.state.with_data(|state| state.keys.active_item_index())
    }

    /// Observes the intents of the level until the [`Subscription`] is
    /// dropped.
    pub fn subscribe(&self, f: impl Fn(&Intent<T>) + 'static) -> Subscription
    where
        T: 'static,
    {
        self.state.with_data(|state| state.intents.subscribe(f))
    }

    pub(crate) fn downgrade(&self) -> WeakLevel<T> {
        WeakLevel {
            state: self.state.downgrade(),
        }
    }

    fn row_index(&self, element: element::Id) -> Option<usize> {
        self.state
            .with_data(|state| state.rows.iter().position(|row| *row == element))
    }
}

impl<T: Clone + 'static> MenuLevel<T> {
    /// Creates a leaf level showing `items` for the given context value.
    ///
    /// The value is assigned to every item.
    pub fn new(
        items: Vec<MenuItem<T>>,
        value: Option<T>,
        overlay: overlay::Handle,
        dir: Option<LayoutDirection>,
        menu_class: SmolStr,
    ) -> Self {
        for item in &items {
            item.set_value(value.clone());
        }

        let rows = items.iter().map(|_| element::Id::unique()).collect();

        Self {
            state: RcWrapper::new(State {
                keys: KeyManager::new(items).with_wrap(),
                rows,
                value,
                dir,
                menu_class,
                overlay,
                is_leaf: true,
                intents: Emitter::new(),
            }),
        }
    }

    /// Returns the items of the level.
    pub fn items(&self) -> Vec<MenuItem<T>> {
        self.state.with_data(|state| state.keys.items().to_vec())
    }

    /// Returns the context value of the level.
    pub fn value(&self) -> Option<T> {
        self.state.with_data(|state| state.value.clone())
    }

    /// Returns the active item.
    pub fn active_item(&self) -> Option<MenuItem<T>> {
        self.state
            .with_data(|state| state.keys.active_item().cloned())
    }

    /// Makes the item at `index` the active one.
    pub fn set_active_item(&self, index: usize) {
        self.with_keys(|keys| keys.set_active_item(index));
    }

    /// Removes the active mark of every item.
    pub fn deactivate_items(&self) {
        for item in self.items() {
            item.set_active(false);
        }
    }

    /// Processes an event, delivering the resulting intents to the
    /// subscribers before returning.
    pub fn handle_event(&self, event: &Event) -> event::Status {
        let mut intents = Vec::new();
        let mut shell = Shell::new(&mut intents);

        self.update(event, &mut shell);

        let status = shell.event_status();
        let emitter = self.state.with_data(|state| state.intents.clone());

        for intent in &intents {
            emitter.emit(intent);
        }

        status
    }

    /// Processes an event, publishing the resulting intents to the [`Shell`].
    ///
    /// The event is captured when the level acts on it.
    pub fn update(&self, event: &Event, shell: &mut Shell<'_, Intent<T>>) {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, target, .. }) => {
                self.on_key_pressed(event, key, target.as_ref(), shell);
            }
            Event::Mouse(mouse_event) => {
                self.on_mouse(event, mouse_event, shell);
            }
        }
    }

    fn on_key_pressed(
        &self,
        event: &Event,
        key: &Key,
        target: Option<&Target>,
        shell: &mut Shell<'_, Intent<T>>,
    ) {
        if !self.is_leaf() {
            return;
        }

        if target.is_some_and(Target::is_editable) {
            log::trace!("Key {key:?} left to editable target");
            return;
        }

        let Some(named) = key.as_named() else {
            return;
        };

        match named {
            Named::ArrowDown | Named::ArrowUp => {
                if self.with_keys(|keys| keys.on_keydown(key)) {
                    shell.capture_event();
                }
            }
            Named::ArrowRight | Named::ArrowLeft => {
                let opens = (named == Named::ArrowRight) == self.direction().is_ltr();

                if opens {
                    self.open_active_item_sub_menu(event, shell);
                } else {
                    self.close_active_item_sub_menu(shell);
                }
            }
            Named::Enter | Named::Space => {
                if let Some(index) = self.active_item_index() {
                    self.select(index, event, shell);
                }
            }
            Named::Escape => {
                log::trace!("Escape closes the leaf menu");

                shell.publish(Intent::CloseLeafMenu {
                    exclude_root_menu: false,
                });
                shell.capture_event();
            }
            _ => {}
        }
    }

    fn on_mouse(
        &self,
        event: &Event,
        mouse_event: &mouse::Event,
        shell: &mut Shell<'_, Intent<T>>,
    ) {
        let row = mouse_event
            .target()
            .and_then(|target| target.element)
            .and_then(|element| self.row_index(element));

        match *mouse_event {
            mouse::Event::Click {
                button: mouse::Button::Left,
                position,
                ..
            } => {
                if let Some(index) = row {
                    self.on_row_click(index, event, shell);
                    return;
                }

                if self.bounds().contains(position) {
                    return;
                }

                log::trace!("Click at {position} outside of the menu");
                shell.publish(Intent::CloseAllMenus);
            }
            mouse::Event::Click {
                button: mouse::Button::Right,
                ..
            } => {}
            mouse::Event::Click { .. } => {
                shell.publish(Intent::CloseAllMenus);
            }
            mouse::Event::ContextMenu { position, .. } => {
                if row.is_some() || self.bounds().contains(position) {
                    return;
                }

                shell.publish(Intent::CloseAllMenus);
            }
            mouse::Event::Entered { .. } => {
                if let Some(index) = row {
                    self.on_row_enter(index, event, shell);
                }
            }
        }
    }

    fn on_row_enter(&self, index: usize, event: &Event, shell: &mut Shell<'_, Intent<T>>) {
        if self.is_item_disabled(index) {
            return;
        }

        self.set_active_item(index);

        if self
            .item(index)
            .is_some_and(|item| item.get_sub_menu().is_some())
        {
            self.open_sub_menu(index, event, shell);
            return;
        }

        let Some(row) = self.row_element(index) else {
            return;
        };

        log::trace!("Pointer over row {index} closes the sub menus");
        shell.publish(Intent::OpenSubMenu(OpenRequest::at_element(
            None,
            row,
            Some(self.clone()),
            self.value(),
        )));
    }

    fn on_row_click(&self, index: usize, event: &Event, shell: &mut Shell<'_, Intent<T>>) {
        if self.is_item_disabled(index) {
            log::trace!("Click on disabled row {index} ignored");
            return;
        }

        self.set_active_item(index);
        self.select(index, event, shell);
    }

    fn open_active_item_sub_menu(&self, event: &Event, shell: &mut Shell<'_, Intent<T>>) {
        let Some(index) = self.active_item_index() else {
            return;
        };

        cancel(event, shell);
        self.open_sub_menu(index, event, shell);
    }

    fn close_active_item_sub_menu(&self, shell: &mut Shell<'_, Intent<T>>) {
        if self.active_item_index().is_none() {
            return;
        }

        shell.capture_event();
        shell.publish(Intent::CloseLeafMenu {
            exclude_root_menu: true,
        });
    }

    fn select(&self, index: usize, event: &Event, shell: &mut Shell<'_, Intent<T>>) {
        let Some(item) = self.item(index) else {
            return;
        };

        cancel(event, shell);

        if item.get_sub_menu().is_some() {
            self.open_sub_menu(index, event, shell);
            return;
        }

        let value = self.value();

        if item.trigger_execute(event, value.clone()) {
            shell.publish(Intent::Execute {
                item,
                event: event.clone(),
                value,
            });
        }
    }

    fn open_sub_menu(&self, index: usize, event: &Event, shell: &mut Shell<'_, Intent<T>>) {
        let Some(sub_menu) = self.item(index).and_then(|item| item.get_sub_menu()) else {
            return;
        };

        if self.active_item_index().is_none() {
            return;
        }

        let value = self.value();

        let request = match event {
            Event::Keyboard(_) => match self.row_element(index) {
                Some(row) => {
                    OpenRequest::at_element(Some(sub_menu), row, Some(self.clone()), value)
                }
                None => return,
            },
            Event::Mouse(mouse_event) => match mouse_event.target().and_then(|t| t.element) {
                Some(element) => {
                    OpenRequest::at_element(Some(sub_menu), element, Some(self.clone()), value)
                }
                None => OpenRequest::at_position(Some(sub_menu), mouse_event.position(), value),
            },
        };

        log::trace!("Opening sub menu of item {index}");
        shell.publish(Intent::OpenSubMenu(request));
    }

    fn item(&self, index: usize) -> Option<MenuItem<T>> {
        self.state
            .with_data(|state| state.keys.items().get(index).cloned())
    }

    fn is_item_disabled(&self, index: usize) -> bool {
        self.item(index).as_ref().is_none_or(MenuItem::is_disabled)
    }

    fn with_keys<R>(&self, f: impl FnOnce(&mut KeyManager<MenuItem<T>>) -> R) -> R {
        let mut keys = self.state.with_data(|state| state.keys.clone());
        let result = f(&mut keys);

        self.state.with_data_mut(|state| state.keys = keys);

        result
    }
}

/// Cancels the event, unless it is aimed at an editable node.
fn cancel<T>(event: &Event, shell: &mut Shell<'_, Intent<T>>) {
    if event.target().as_ref().is_some_and(Target::is_editable) {
        return;
    }

    shell.capture_event();
}

impl<T> Clone for MenuLevel<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> PartialEq for MenuLevel<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state.ptr_eq(&other.state)
    }
}

impl<T> fmt::Debug for MenuLevel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.with_data(|state| {
            f.debug_struct("MenuLevel")
                .field("rows", &state.rows.len())
                .field("active", &state.keys.active_item_index())
                .field("dir", &state.dir)
                .field("is_leaf", &state.is_leaf)
                .field("overlay", &state.overlay.id())
                .finish()
        })
    }
}

/// A non-owning [`MenuLevel`].
pub(crate) struct WeakLevel<T> {
    state: WeakWrapper<State<T>>,
}

impl<T> WeakLevel<T> {
    pub(crate) fn upgrade(&self) -> Option<MenuLevel<T>> {
        self.state.upgrade().map(|state| MenuLevel { state })
    }
}
