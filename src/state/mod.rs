//! State Module - Interaction state systems
//!
//! This module contains the state machines and host plumbing that power
//! component interactivity:
//!
//! - **Disclosure** - Open/closed panels, outside-click dismissal
//! - **Selection** - Single/multiple selection over known options
//! - **Typeahead** - Debounced prefix search buffer
//! - **Scheduler** - Next-tick deferral and timers
//! - **Focus** - Host focus sink
//! - **Keyboard** - Key names and event types
//! - **Input** - crossterm event conversion

mod disclosure;
mod focus;
pub mod input;
mod keyboard;
mod scheduler;
mod selection;
mod typeahead;

pub use disclosure::*;
pub use focus::*;
pub use keyboard::*;
pub use scheduler::*;
pub use selection::*;
pub use typeahead::*;
