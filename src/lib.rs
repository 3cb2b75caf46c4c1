//! # raxui
//!
//! Headless, accessible UI component state for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! raxui renders nothing. Each component is a small state machine that
//! answers host events (`handle_key_down`, `handle_click`, ...) and
//! resolves to the ARIA attributes the host should put on its element.
//! Every list-like component shares one core:
//!
//! ```text
//! Registry (mount order) ─┐
//!                         ├─ Collection ── active index (resolver) + typeahead
//! Disclosure (open/closed)┘       │
//!                                 └─ SelectionState (single / multiple)
//! ```
//!
//! Components find their parent's state through a [`engine::Scope`] tree,
//! and defer focus moves through the runtime's [`state::Scheduler`].
//!
//! ## Modules
//!
//! - [`engine`] - Registry, active-index resolver, collection, runtime, scopes
//! - [`state`] - Disclosure, selection, typeahead, scheduler, focus, keyboard
//! - [`render`] - Render strategy and attribute output
//! - [`components`] - Menu, Select, Radio, Checkbox, Tags, Tabs, Modal, Button
//! - [`config`] - Runtime configuration
//! - [`error`] - Error type

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod state;

// Re-export commonly used items
pub use config::RaxConfig;
pub use error::{RaxError, Result};

pub use engine::{Collection, Focus, Item, PointerEvent, Registry, Runtime, Scope};

pub use render::{Attrs, Features, RenderProps, Rendered};

pub use state::{
    Disclosure, DisclosureState, FocusHost, Key, KeyboardEvent, Modifiers, Scheduler,
    SelectionEvent, SelectionMode, SelectionState,
};
