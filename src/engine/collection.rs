//! Collection - Registry + active index + typeahead.
//!
//! The list primitive behind every roving-focus component. Menus, selects,
//! radio groups and tab lists each own one [`Collection`] and drive it from
//! their key handlers:
//!
//! ```text
//! ArrowDown ──► go_to(Focus::Next) ──► resolve_active_index ──► active
//! "a"       ──► search('a')        ──► find_match           ──► active
//! unmount   ──► unregister(id)     ──► resync by identity   ──► active
//! ```
//!
//! The active index is a signal, so "is this item active?" read inside a
//! derived or effect re-runs whenever virtual focus moves.

use spark_signals::{Signal, signal};

use super::navigation::{Focus, resolve, resync_active_index};
use super::registry::{Item, Registry};
use super::runtime::Runtime;
use crate::state::{Typeahead, find_match};

pub struct Collection<V> {
    registry: Registry<V>,
    active: Signal<Option<usize>>,
    typeahead: Typeahead,
}

impl<V: Clone> Collection<V> {
    pub fn new(runtime: &Runtime) -> Self {
        Self {
            registry: Registry::new(),
            active: signal(None),
            typeahead: Typeahead::new(
                runtime.scheduler().clone(),
                runtime.config().typeahead_debounce,
            ),
        }
    }

    pub fn registry(&self) -> &Registry<V> {
        &self.registry
    }

    /// Fresh snapshot of the registered items.
    pub fn items(&self) -> Vec<Item<V>> {
        self.registry.items()
    }

    /// Handle to the active-index signal. Disclosures keep one so closing
    /// can reset it.
    pub fn active_signal(&self) -> Signal<Option<usize>> {
        self.active.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.get()
    }

    pub fn active_item(&self) -> Option<Item<V>> {
        self.active.get().and_then(|index| self.registry.get_index(index))
    }

    pub fn active_id(&self) -> Option<String> {
        self.active_item().map(|item| item.id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id().as_deref() == Some(id)
    }

    /// Current typeahead query.
    pub fn query(&self) -> String {
        self.typeahead.query()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move virtual focus. Clears the typeahead query.
    pub fn go_to(&self, focus: Focus) -> Option<usize> {
        let items = self.registry.items();
        let current = self.active.get();
        let next = resolve(&focus, &items, current);
        tracing::trace!(?focus, ?current, ?next, "go_to");

        if self.typeahead.is_empty() && next == current {
            return next;
        }
        self.typeahead.clear();
        self.set_active(next);
        next
    }

    /// Feed one typed character to the typeahead. Returns whether the
    /// resulting query matched an item.
    pub fn search(&self, ch: char) -> bool {
        let query = self.typeahead.append_char(ch);
        let items = self.registry.items();
        match find_match(&items, &query) {
            Some(index) => {
                tracing::trace!(%query, index, "typeahead match");
                self.set_active(Some(index));
                true
            }
            None => {
                tracing::trace!(%query, "typeahead miss");
                false
            }
        }
    }

    pub fn clear_search(&self) {
        self.typeahead.clear();
    }

    /// Force the active index (used by disclosures and tests).
    pub fn set_active(&self, index: Option<usize>) {
        if self.active.get() != index {
            self.active.set(index);
        }
    }

    // =========================================================================
    // Membership
    // =========================================================================

    pub fn register(&self, item: Item<V>) -> bool {
        self.registry.register(item)
    }

    /// Remove an item, keeping virtual focus on the same logical item.
    pub fn unregister(&self, id: &str) -> Option<Item<V>> {
        let active_id = self.active_id();
        let removed = self.registry.unregister(id)?;
        let items = self.registry.items();
        let next = resync_active_index(active_id.as_deref(), &items);
        self.set_active(next);
        Some(removed)
    }

    pub fn set_disabled(&self, id: &str, disabled: bool) -> bool {
        self.registry.set_disabled(id, disabled)
    }
}
