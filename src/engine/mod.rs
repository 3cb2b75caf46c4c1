//! Engine - Registry, navigation and the plumbing components share.
//!
//! The engine manages the core data structures:
//! - Registry: ordered, id-keyed items in mount order
//! - Navigation: the active-index resolver
//! - Collection: registry + active index + typeahead, the list primitive
//! - Runtime: scheduler, ids, config, window events and focus host
//! - Context: scopes that carry parent handles down to descendants
//!
//! # Architecture
//!
//! Components are NOT objects holding DOM. They are small state machines
//! over signals, wired together through a [`Scope`] tree:
//!
//! ```text
//! Menu        (Disclosure, Collection<MenuItemData>)  provides MenuApi
//! ├─ MenuButton                                       requires MenuApi
//! └─ MenuItems                                        requires MenuApi
//!    ├─ MenuItem "Edit"   -> registry index 0
//!    └─ MenuItem "Delete" -> registry index 1
//! ```

mod collection;
mod context;
mod navigation;
mod registry;
mod runtime;

pub use collection::*;
pub use context::*;
pub use navigation::*;
pub use registry::*;
pub use runtime::*;
