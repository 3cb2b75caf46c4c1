//! Focus System - The host's real focus, as seen by the components
//!
//! Components never own DOM (or terminal) focus. They track a logical
//! "active" item themselves and ask the host to move real focus through a
//! [`FocusHost`]: into a panel right after it opens, back to the trigger
//! after it closes.
//!
//! Focus moves are always issued from a next-tick callback, after the panel
//! has been committed by the host's render.
//!
//! # Example
//!
//! ```
//! use raxui::state::{FocusHost, RecordingFocusHost};
//!
//! let host = RecordingFocusHost::new();
//! host.focus("raxui-menu-items-1");
//! host.focus("raxui-menu-button-0");
//! assert_eq!(host.focused().as_deref(), Some("raxui-menu-button-0"));
//! assert_eq!(host.history().len(), 2);
//! ```

use std::cell::RefCell;

/// Moves real focus on the host side.
pub trait FocusHost {
    /// Focus the element with this id.
    fn focus(&self, element_id: &str);

    /// Remove focus from the element with this id, if it has it.
    fn blur(&self, element_id: &str) {
        let _ = element_id;
    }
}

/// A host that ignores focus requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFocusHost;

impl FocusHost for NullFocusHost {
    fn focus(&self, _element_id: &str) {}
}

// =============================================================================
// RECORDING HOST
// =============================================================================

const MAX_HISTORY: usize = 32;

/// A headless host that remembers where focus went.
///
/// Useful for terminal hosts that draw focus themselves, and for tests.
#[derive(Debug, Default)]
pub struct RecordingFocusHost {
    focused: RefCell<Option<String>>,
    history: RefCell<Vec<String>>,
}

impl RecordingFocusHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element that currently has focus.
    pub fn focused(&self) -> Option<String> {
        self.focused.borrow().clone()
    }

    /// Every focus request, oldest first (bounded).
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// Forget focus and history.
    pub fn reset(&self) {
        self.focused.borrow_mut().take();
        self.history.borrow_mut().clear();
    }
}

impl FocusHost for RecordingFocusHost {
    fn focus(&self, element_id: &str) {
        *self.focused.borrow_mut() = Some(element_id.to_string());
        let mut history = self.history.borrow_mut();
        history.push(element_id.to_string());
        if history.len() > MAX_HISTORY {
            history.remove(0);
        }
    }

    fn blur(&self, element_id: &str) {
        let mut focused = self.focused.borrow_mut();
        if focused.as_deref() == Some(element_id) {
            focused.take();
        }
    }
}
