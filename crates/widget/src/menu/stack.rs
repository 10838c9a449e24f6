//! Track the levels of the open menu chain.
use crate::menu::MenuLevel;
use crate::menu::state::RcWrapper;
use crate::overlay;

use std::fmt;

/// An open menu level and the surface that holds it.
#[derive(Debug)]
pub struct Entry<T> {
    /// The surface of the level.
    pub overlay: overlay::Handle,

    /// The level.
    pub level: MenuLevel<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            overlay: self.overlay.clone(),
            level: self.level.clone(),
        }
    }
}

impl<T> Entry<T> {
    fn dispose(self) {
        self.overlay.detach();
        self.overlay.dispose();
    }

    fn is_detached(&self) -> bool {
        !self.overlay.has_attached()
    }
}

/// The open menu levels, root first.
///
/// Every operation disposes the entries it drops before returning. An entry
/// leaves the stack as it is disposed, so no surface is released twice.
pub struct MenuStack<T> {
    entries: RcWrapper<Vec<Entry<T>>>,
}

impl<T> MenuStack<T> {
    /// Creates an empty [`MenuStack`].
    pub fn new() -> Self {
        Self {
            entries: RcWrapper::new(Vec::new()),
        }
    }

    /// Appends a level on top of the chain.
    pub fn push(&self, entry: Entry<T>) {
        let size = self.entries.with_data_mut(|entries| {
            entries.push(entry);
            entries.len()
        });

        log::debug!("Menu level pushed, stack size {size}");
    }

    /// Returns the amount of open levels.
    pub fn size(&self) -> usize {
        self.entries.with_data(Vec::len)
    }

    /// Returns `true` if no level is open.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the open levels, root first.
    pub fn levels(&self) -> Vec<MenuLevel<T>> {
        self.entries.with_data(|entries| {
            entries
                .iter()
                .map(|entry| entry.level.clone())
                .collect()
        })
    }

    /// Returns the deepest open level.
    pub fn last(&self) -> Option<MenuLevel<T>> {
        self.entries
            .with_data(|entries| entries.last().map(|entry| entry.level.clone()))
    }

    /// Disposes every level.
    pub fn close_all(&self) {
        let entries = self.entries.with_data_mut(std::mem::take);

        if entries.is_empty() {
            return;
        }

        log::debug!("Closing all {} menu levels", entries.len());

        for entry in entries {
            entry.dispose();
        }
    }

    /// Disposes every level above the given one.
    ///
    /// Nothing happens when the level is absent or not on the stack.
    pub fn destroy_sub_menus(&self, level: Option<&MenuLevel<T>>) {
        let Some(level) = level else {
            return;
        };

        let overlay = level.overlay();

        let removed = self.entries.with_data_mut(|entries| {
            entries
                .iter()
                .position(|entry| entry.overlay == overlay)
                .map(|index| entries.split_off(index + 1))
        });

        let Some(removed) = removed else {
            return;
        };

        if !removed.is_empty() {
            log::debug!("Destroying {} sub menus", removed.len());
        }

        for entry in removed {
            entry.dispose();
        }
    }

    /// Closes the deepest open level.
    ///
    /// Levels whose surface was detached behind the stack's back are
    /// disposed first. When `exclude_root_menu` is set the root level stays
    /// open and the new deepest level becomes the leaf again.
    ///
    /// Returns `true` if the chain collapsed, root included.
    pub fn close_leaf_menu(&self, exclude_root_menu: bool) -> bool {
        let Some(leaf) = self.dispose_last_detached() else {
            return false;
        };

        let more_than_one = self.size() > 1;
        let include_root = !exclude_root_menu && !self.is_empty();

        if more_than_one || include_root {
            let removed = self.entries.with_data_mut(|entries| {
                entries
                    .iter()
                    .rposition(|entry| entry.overlay == leaf.overlay)
                    .map(|index| entries.remove(index))
            });

            log::debug!("Closing leaf menu, root included: {include_root}");

            if let Some(entry) = removed {
                entry.dispose();
            }
        }

        if include_root {
            return true;
        }

        if let Some(entry) = self.dispose_last_detached() {
            entry.level.set_leaf(true);
        }

        false
    }

    fn dispose_last_detached(&self) -> Option<Entry<T>> {
        while let Some(entry) = self.entries.with_data_mut(pop_detached) {
            log::debug!("Disposing detached menu level");
            entry.dispose();
        }

        self.entries.with_data(|entries| entries.last().cloned())
    }
}

/// Pops the tail when it is detached, unless it is the root.
fn pop_detached<T>(entries: &mut Vec<Entry<T>>) -> Option<Entry<T>> {
    if entries.len() > 1 && entries.last().is_some_and(Entry::is_detached) {
        entries.pop()
    } else {
        None
    }
}

impl<T> Default for MenuStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MenuStack<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> fmt::Debug for MenuStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuStack")
            .field("size", &self.size())
            .finish()
    }
}
