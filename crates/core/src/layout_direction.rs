//! Layout direction support for RTL (right-to-left) languages.
//!
//! Context menus flip two things with the layout direction: which horizontal
//! arrow key opens a submenu and which one closes it, and the order of the
//! candidate positions handed to the overlay provider.
//!
//! A menu may leave its direction unset; submenus then inherit the direction
//! of the level that opened them:
//!
//! ```
//! use icy_context_menu_core::LayoutDirection;
//!
//! let own = None;
//! let parent = Some(LayoutDirection::Rtl);
//!
//! assert_eq!(LayoutDirection::inherit(own, parent), Some(LayoutDirection::Rtl));
//! assert!(LayoutDirection::resolve(own).is_ltr());
//! ```

/// The direction of the layout flow.
///
/// This determines whether the layout flows from left-to-right (LTR)
/// or right-to-left (RTL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LayoutDirection {
    /// Left-to-right layout (default for most Western languages).
    #[default]
    Ltr = 0,
    /// Right-to-left layout (for Arabic, Hebrew, etc.).
    Rtl = 1,
}

impl LayoutDirection {
    /// Returns `true` if the layout direction is left-to-right.
    pub fn is_ltr(self) -> bool {
        matches!(self, Self::Ltr)
    }

    /// Returns `true` if the layout direction is right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Resolves an optional direction, falling back to [`LayoutDirection::Ltr`].
    pub fn resolve(direction: Option<Self>) -> Self {
        direction.unwrap_or_default()
    }

    /// Picks `own` when set, otherwise the `parent` direction.
    pub fn inherit(own: Option<Self>, parent: Option<Self>) -> Option<Self> {
        own.or(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherit_prefers_own_direction() {
        assert_eq!(
            LayoutDirection::inherit(Some(LayoutDirection::Ltr), Some(LayoutDirection::Rtl)),
            Some(LayoutDirection::Ltr)
        );
        assert_eq!(LayoutDirection::inherit(None, None), None);
    }

    #[test]
    fn test_resolve_defaults_to_ltr() {
        assert_eq!(LayoutDirection::resolve(None), LayoutDirection::Ltr);
        assert!(LayoutDirection::resolve(Some(LayoutDirection::Rtl)).is_rtl());
    }
}
