//! Nested context menus.
//!
//! # Example
//!
//! ```
//! use icy_context_menu_widget::core::{Condition, Point};
//! use icy_context_menu_widget::menu::{ContextMenu, MenuItem, Services, Settings};
//! use icy_context_menu_widget::overlay::Headless;
//!
//! let services = Services::new(Headless::default(), Settings::default());
//!
//! let share = ContextMenu::new(
//!     &services,
//!     [MenuItem::new("Mail"), MenuItem::new("Chat")],
//! );
//!
//! let menu = ContextMenu::new(
//!     &services,
//!     [
//!         MenuItem::new("Open"),
//!         MenuItem::new("Delete")
//!             .disabled(Condition::predicate(|path: Option<&&str>| path.is_none())),
//!         MenuItem::divider(),
//!         MenuItem::new("Share").sub_menu(share),
//!     ],
//! );
//!
//! services.show(&menu, Point::new(12.0, 40.0), Some("notes.txt"));
//!
//! assert_eq!(services.stack().size(), 1);
//! ```
mod bus;
mod context_menu;
mod item;
mod level;
pub mod position;
mod services;
mod stack;
pub(crate) mod state;
mod trigger;

pub use bus::{Anchor, EventBus, OpenRequest};
pub use context_menu::ContextMenu;
pub use item::{Execute, MenuItem};
pub use level::{Intent, MenuLevel};
pub use services::{Services, Settings};
pub use stack::{Entry, MenuStack};
pub use trigger::{ContextMenuTrigger, HoverTrigger};
