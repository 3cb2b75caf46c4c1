//! Components - Headless, accessible UI building blocks.
//!
//! This module provides:
//! - [`menu`] - Button + action list with typeahead
//! - [`select`] - Listbox with single or multiple selection
//! - [`radio`] / [`checkbox`] - Option groups
//! - [`tags`] - Tag picker with filter and create-new
//! - [`tabs`] - Tab list and panels
//! - [`modal`] / [`button`] - Dialog and plain button
//!
//! # Architecture
//!
//! Every component is a root plus parts. The root owns the state and
//! provides an `Api` handle into a child [`Scope`](crate::engine::Scope);
//! parts mount into that scope, require the handle, and expose
//! `handle_*` methods for host events and `render()` for ARIA output.
//!
//! Event handlers return `true` when they consumed the event (the host
//! should prevent the default action).

pub mod button;
pub mod checkbox;
pub mod menu;
pub mod modal;
pub mod radio;
pub mod select;
mod shared;
pub mod tabs;
pub mod tags;
pub mod types;

pub use button::*;
pub use checkbox::*;
pub use menu::*;
pub use modal::*;
pub use radio::*;
pub use select::*;
pub use tabs::*;
pub use tags::*;
pub use types::*;
