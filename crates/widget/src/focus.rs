//! Roving focus over a list of items.
//!
//! A [`KeyManager`] marks one item of a list as active and moves that mark
//! with the arrow keys, instead of moving the keyboard focus between nodes.
//! Disabled items are skipped.
use crate::core::keyboard::{Key, Named};

/// An item that can carry the active mark of a [`KeyManager`].
pub trait Highlightable {
    /// Marks the item as active.
    fn set_active_styles(&self);

    /// Removes the active mark of the item.
    fn set_inactive_styles(&self);

    /// Returns `true` if the item must be skipped.
    fn is_disabled(&self) -> bool {
        false
    }
}

/// Tracks the active item of a list, active-descendant style.
#[derive(Debug, Clone)]
pub struct KeyManager<I> {
    items: Vec<I>,
    active: Option<usize>,
    wrap: bool,
}

impl<I> KeyManager<I> {
    /// Creates a [`KeyManager`] over the given items, with no active item.
    pub fn new(items: Vec<I>) -> Self {
        Self {
            items,
            active: None,
            wrap: false,
        }
    }

    /// Wraps around when moving past either end of the list.
    #[must_use]
    pub fn with_wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Returns the items of the [`KeyManager`].
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Returns the index of the active item.
    pub fn active_item_index(&self) -> Option<usize> {
        self.active
    }

    /// Returns the active item.
    pub fn active_item(&self) -> Option<&I> {
        self.active.and_then(|index| self.items.get(index))
    }
}

impl<I: Highlightable> KeyManager<I> {
    /// Moves the active mark for the given key.
    ///
    /// Returns `true` if the key is handled by the [`KeyManager`].
    pub fn on_keydown(&mut self, key: &Key) -> bool {
        match key.as_named() {
            Some(Named::ArrowDown) => {
                self.set_next_item_active();
                true
            }
            Some(Named::ArrowUp) => {
                self.set_previous_item_active();
                true
            }
            _ => false,
        }
    }

    /// Makes the item at `index` the active one.
    pub fn set_active_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }

        if let Some(previous) = self.active_item() {
            previous.set_inactive_styles();
        }

        self.active = Some(index);

        if let Some(item) = self.active_item() {
            item.set_active_styles();
        }
    }

    /// Makes the next enabled item active.
    pub fn set_next_item_active(&mut self) {
        let current = self.active.map_or(-1, |index| index as isize);

        self.move_from(current, 1);
    }

    /// Makes the previous enabled item active.
    pub fn set_previous_item_active(&mut self) {
        let current = self
            .active
            .map_or(self.items.len() as isize, |index| index as isize);

        self.move_from(current, -1);
    }

    fn move_from(&mut self, current: isize, delta: isize) {
        let len = self.items.len() as isize;

        if len == 0 {
            return;
        }

        let candidate = if self.wrap {
            (1..=len)
                .map(|step| (current + delta * step).rem_euclid(len))
                .find(|&index| !self.items[index as usize].is_disabled())
        } else {
            std::iter::successors(Some(current + delta), |index| Some(index + delta))
                .take_while(|index| (0..len).contains(index))
                .find(|&index| !self.items[index as usize].is_disabled())
        };

        if let Some(index) = candidate {
            self.set_active_item(index as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Row {
        active: Rc<Cell<bool>>,
        disabled: bool,
    }

    fn rows(disabled: &[bool]) -> Vec<Row> {
        disabled
            .iter()
            .map(|&disabled| Row {
                active: Rc::new(Cell::new(false)),
                disabled,
            })
            .collect()
    }

    impl Highlightable for Row {
        fn set_active_styles(&self) {
            self.active.set(true);
        }

        fn set_inactive_styles(&self) {
            self.active.set(false);
        }

        fn is_disabled(&self) -> bool {
            self.disabled
        }
    }

    fn active_marks(manager: &KeyManager<Row>) -> Vec<bool> {
        manager.items().iter().map(|row| row.active.get()).collect()
    }

    #[test]
    fn test_arrow_down_starts_at_first_enabled() {
        let mut manager = KeyManager::new(rows(&[true, false, false])).with_wrap();

        assert_eq!(manager.active_item_index(), None);
        assert!(manager.on_keydown(&Key::Named(Named::ArrowDown)));
        assert_eq!(manager.active_item_index(), Some(1));
        assert_eq!(active_marks(&manager), vec![false, true, false]);
    }

    #[test]
    fn test_arrow_up_starts_at_last_enabled() {
        let mut manager = KeyManager::new(rows(&[false, false, true])).with_wrap();

        let _ = manager.on_keydown(&Key::Named(Named::ArrowUp));

        assert_eq!(manager.active_item_index(), Some(1));
    }

    #[test]
    fn test_wrap_skips_disabled() {
        let mut manager = KeyManager::new(rows(&[false, true, false, true])).with_wrap();

        manager.set_active_item(2);
        manager.set_next_item_active();

        assert_eq!(manager.active_item_index(), Some(0));
        assert_eq!(active_marks(&manager), vec![true, false, false, false]);

        manager.set_previous_item_active();

        assert_eq!(manager.active_item_index(), Some(2));
    }

    #[test]
    fn test_without_wrap_stays_at_end() {
        let mut manager = KeyManager::new(rows(&[false, false]));

        manager.set_active_item(1);
        manager.set_next_item_active();

        assert_eq!(manager.active_item_index(), Some(1));
    }

    #[test]
    fn test_other_keys_are_not_handled() {
        let mut manager = KeyManager::new(rows(&[false]));

        assert!(!manager.on_keydown(&Key::Named(Named::Enter)));
        assert!(!manager.on_keydown(&Key::Character("a".into())));
        assert_eq!(manager.active_item_index(), None);
    }

    #[test]
    fn test_all_disabled_keeps_nothing_active() {
        let mut manager = KeyManager::new(rows(&[true, true])).with_wrap();

        manager.set_next_item_active();

        assert_eq!(manager.active_item_index(), None);
    }

    #[test]
    fn test_accessors_work_for_any_item() {
        let manager = KeyManager::new(vec!["Copy", "Paste"]);

        assert_eq!(manager.items(), ["Copy", "Paste"]);
        assert_eq!(manager.active_item_index(), None);
        assert_eq!(manager.active_item(), None);
    }
}
