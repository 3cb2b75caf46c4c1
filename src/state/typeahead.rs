//! Typeahead - Keystrokes accumulated into a prefix query.
//!
//! Each printable key is appended (lower-cased) to a query buffer. The
//! buffer is matched against the normalized text of registered items by
//! prefix, first enabled match wins.
//!
//! The buffer clears itself once no key has been typed for the debounce
//! window. Every new keystroke re-arms that timer. A query that matched
//! nothing is kept as-is until it clears.

use std::cell::RefCell;
use std::time::Duration;

use spark_signals::{Signal, signal};

use super::scheduler::{Scheduler, TaskHandle};
use crate::engine::Item;

/// Query buffer with a debounced reset.
pub struct Typeahead {
    query: Signal<String>,
    scheduler: Scheduler,
    debounce: Duration,
    pending_clear: RefCell<Option<TaskHandle>>,
}

impl Typeahead {
    pub fn new(scheduler: Scheduler, debounce: Duration) -> Self {
        Self {
            query: signal(String::new()),
            scheduler,
            debounce,
            pending_clear: RefCell::new(None),
        }
    }

    /// Current query (reactive).
    pub fn query(&self) -> String {
        self.query.get()
    }

    pub fn is_empty(&self) -> bool {
        self.query.get().is_empty()
    }

    /// Append a character and re-arm the debounce. Returns the new query.
    pub fn append_char(&self, ch: char) -> String {
        let mut query = self.query.get();
        query.extend(ch.to_lowercase());
        self.query.set(query.clone());
        self.arm_clear();
        query
    }

    /// Empty the buffer and drop any pending reset.
    pub fn clear(&self) {
        self.cancel_pending();
        if !self.query.get().is_empty() {
            self.query.set(String::new());
        }
    }

    /// Whether a debounce reset is armed.
    pub fn is_pending(&self) -> bool {
        self.pending_clear
            .borrow()
            .as_ref()
            .is_some_and(TaskHandle::is_pending)
    }

    fn arm_clear(&self) {
        self.cancel_pending();
        let query = self.query.clone();
        let task = self.scheduler.set_timeout(self.debounce, move || {
            tracing::trace!("typeahead query expired");
            query.set(String::new());
        });
        *self.pending_clear.borrow_mut() = Some(task);
    }

    fn cancel_pending(&self) {
        if let Some(task) = self.pending_clear.borrow_mut().take() {
            task.cancel();
        }
    }
}

impl Drop for Typeahead {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Index of the first enabled item whose search text starts with `query`.
pub fn find_match<V>(items: &[Item<V>], query: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    items
        .iter()
        .position(|item| !item.disabled && item.search_text.starts_with(query))
}
