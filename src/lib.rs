//! Nested, overlay-based context menus with keyboard navigation.
//!
//! A [`ContextMenu`] declares a list of [`MenuItem`]s. Triggers publish open
//! requests on the bus of the application's [`Services`]; the menu a request
//! targets opens a level in a surface created by an [`overlay::Overlay`]
//! provider. Items may open submenus, which stack up into a chain of levels
//! that the keyboard and the pointer navigate.
//!
//! ```
//! use icy_context_menu::core::Point;
//! use icy_context_menu::core::keyboard::{self, Named};
//! use icy_context_menu::overlay::Headless;
//! use icy_context_menu::{ContextMenu, MenuItem, Services, Settings};
//!
//! let services = Services::new(Headless::default(), Settings::default());
//! let menu = ContextMenu::new(&services, [MenuItem::new("Rename"), MenuItem::new("Delete")]);
//!
//! services.show(&menu, Point::new(80.0, 24.0), Some(42_u32));
//!
//! let _ = services.update(&keyboard::Event::pressed(Named::ArrowDown, None).into());
//! let _ = services.update(&keyboard::Event::pressed(Named::Enter, None).into());
//!
//! assert!(services.stack().is_empty());
//! ```
//!
//! The `core` module holds the primitives shared with hosts and overlay
//! providers: geometry, input events, layout direction and conditions.
pub use icy_context_menu_core as core;
pub use icy_context_menu_widget::{focus, menu, overlay};

pub use icy_context_menu_core::{Condition, Event, LayoutDirection, Point};
pub use menu::{
    ContextMenu, ContextMenuTrigger, Execute, HoverTrigger, MenuItem, OpenRequest, Services,
    Settings,
};
