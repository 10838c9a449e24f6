//! Context menus for hosts of [icy_context_menu_core].
//!
//! Menus are declared with [`menu::ContextMenu`] and [`menu::MenuItem`],
//! opened by triggers through the bus of a shared [`menu::Services`], and
//! materialized by an [`overlay::Overlay`] provider.
//!
//! [icy_context_menu_core]: https://docs.rs/icy_context_menu_core
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_context_menu_core as core;

pub mod focus;
pub mod menu;
pub mod overlay;

pub use menu::{ContextMenu, MenuItem, Services, Settings};
