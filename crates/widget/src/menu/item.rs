//! Declare the entries of a context menu.
use crate::core::{Condition, Emitter, Event, Subscription, evaluate};
use crate::focus::Highlightable;
use crate::menu::ContextMenu;
use crate::menu::state::RcWrapper;

use smol_str::SmolStr;

use std::fmt;

/// The payload of an executed [`MenuItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct Execute<T> {
    /// The event that selected the item.
    pub event: Event,

    /// The context value the menu was opened for.
    pub value: Option<T>,
}

struct State<T> {
    label: SmolStr,
    disabled: Condition<T>,
    visible: Condition<T>,
    divider: bool,
    passive: bool,
    sub_menu: Option<ContextMenu<T>>,
    value: Option<T>,
    is_active: bool,
}

/// An entry of a [`ContextMenu`].
///
/// A [`MenuItem`] is a shared handle: the menu that declares it, the levels
/// that show it and the focus helper all look at the same entry.
pub struct MenuItem<T> {
    state: RcWrapper<State<T>>,
    execute: Emitter<Execute<T>>,
}

impl<T: Clone + 'static> MenuItem<T> {
    /// Creates an enabled, visible [`MenuItem`] with the given label.
    pub fn new(label: impl Into<SmolStr>) -> Self {
        Self {
            state: RcWrapper::new(State {
                label: label.into(),
                disabled: Condition::Static(false),
                visible: Condition::Static(true),
                divider: false,
                passive: false,
                sub_menu: None,
                value: None,
                is_active: false,
            }),
            execute: Emitter::new(),
        }
    }

    /// Creates a separator.
    pub fn divider() -> Self {
        let item = Self::new("");
        item.state.with_data_mut(|state| state.divider = true);
        item
    }

    /// Sets whether the item is disabled.
    #[must_use]
    pub fn disabled(self, disabled: impl Into<Condition<T>>) -> Self {
        let disabled = disabled.into();
        self.state.with_data_mut(|state| state.disabled = disabled);
        self
    }

    /// Sets whether the item is visible.
    #[must_use]
    pub fn visible(self, visible: impl Into<Condition<T>>) -> Self {
        let visible = visible.into();
        self.state.with_data_mut(|state| state.visible = visible);
        self
    }

    /// Makes the item a passive row, e.g. a header.
    #[must_use]
    pub fn passive(self, passive: bool) -> Self {
        self.state.with_data_mut(|state| state.passive = passive);
        self
    }

    /// Opens the given menu when the item is selected, instead of executing.
    #[must_use]
    pub fn sub_menu(self, sub_menu: ContextMenu<T>) -> Self {
        self.state
            .with_data_mut(|state| state.sub_menu = Some(sub_menu));
        self
    }

    /// Calls `f` every time the item is executed, for as long as it lives.
    #[must_use]
    pub fn on_execute(self, f: impl Fn(&Execute<T>) + 'static) -> Self {
        self.execute.subscribe(f).forget();
        self
    }

    /// Observes executions of the item until the [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&Execute<T>) + 'static) -> Subscription {
        self.execute.subscribe(f)
    }

    /// Returns the label of the item.
    pub fn label(&self) -> SmolStr {
        self.state.with_data(|state| state.label.clone())
    }

    /// Returns `true` if the item is a separator.
    pub fn is_divider(&self) -> bool {
        self.state.with_data(|state| state.divider)
    }

    /// Returns `true` if the item is a passive row.
    pub fn is_passive(&self) -> bool {
        self.state.with_data(|state| state.passive)
    }

    /// Returns `true` if the item cannot be selected for its current value.
    ///
    /// Separators and passive rows are always disabled.
    pub fn is_disabled(&self) -> bool {
        let (forced, disabled, value) = self.state.with_data(|state| {
            (
                state.passive || state.divider,
                state.disabled.clone(),
                state.value.clone(),
            )
        });

        forced || evaluate(&disabled, value.as_ref())
    }

    /// Returns `true` if the item shows up for the given context value.
    pub fn is_visible_for(&self, value: Option<&T>) -> bool {
        let visible = self.state.with_data(|state| state.visible.clone());

        evaluate(&visible, value)
    }

    /// Returns the menu the item opens, if any.
    pub fn get_sub_menu(&self) -> Option<ContextMenu<T>> {
        self.state.with_data(|state| state.sub_menu.clone())
    }

    /// Returns the context value assigned by the level showing the item.
    pub fn value(&self) -> Option<T> {
        self.state.with_data(|state| state.value.clone())
    }

    pub(crate) fn set_value(&self, value: Option<T>) {
        self.state.with_data_mut(|state| state.value = value);
    }

    /// Returns `true` if the item carries the active mark of its level.
    pub fn is_active(&self) -> bool {
        self.state.with_data(|state| state.is_active)
    }

    pub(crate) fn set_active(&self, is_active: bool) {
        self.state.with_data_mut(|state| state.is_active = is_active);
    }

    /// Executes the item for the given value, unless it is disabled.
    ///
    /// Returns `true` if the execution was emitted.
    pub fn trigger_execute(&self, event: &Event, value: Option<T>) -> bool {
        let (forced, disabled) = self.state.with_data(|state| {
            (state.passive || state.divider, state.disabled.clone())
        });

        if forced || evaluate(&disabled, value.as_ref()) {
            return false;
        }

        self.execute.emit(&Execute {
            event: event.clone(),
            value,
        });

        true
    }
}

impl<T> Clone for MenuItem<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            execute: self.execute.clone(),
        }
    }
}

impl<T> PartialEq for MenuItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state.ptr_eq(&other.state)
    }
}

impl<T> fmt::Debug for MenuItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.with_data(|state| {
            f.debug_struct("MenuItem")
                .field("label", &state.label)
                .field("divider", &state.divider)
                .field("passive", &state.passive)
                .field("sub_menu", &state.sub_menu.is_some())
                .field("is_active", &state.is_active)
                .finish()
        })
    }
}

impl<T: Clone + 'static> Highlightable for MenuItem<T> {
    fn set_active_styles(&self) {
        self.set_active(true);
    }

    fn set_inactive_styles(&self) {
        self.set_active(false);
    }

    fn is_disabled(&self) -> bool {
        MenuItem::is_disabled(self)
    }
}
