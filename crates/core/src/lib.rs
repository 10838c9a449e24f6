//! The core library of [icy_context_menu].
//!
//! This library holds basic abstractions that can be reused by different
//! hosts and overlay providers: geometry, input events, layout direction,
//! conditions evaluated against a context value, and a synchronous observer
//! list.
//!
//! [icy_context_menu]: https://docs.rs/icy_context_menu
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod alignment;
pub mod condition;
pub mod element;
pub mod emitter;
pub mod event;
pub mod keyboard;
pub mod layout_direction;
pub mod mouse;

mod point;
mod rectangle;
mod shell;
mod size;

pub use alignment::Alignment;
pub use condition::{Condition, evaluate};
pub use emitter::{Emitter, Subscription};
pub use event::Event;
pub use layout_direction::LayoutDirection;
pub use point::Point;
pub use rectangle::Rectangle;
pub use shell::Shell;
pub use size::Size;
