//! Item Registry - Ordered collection of mounted interactive items.
//!
//! Every list-like component (menu items, select options, radios, tabs)
//! registers its children here on mount and unregisters them on unmount.
//!
//! - Insertion order is navigation order. This is mount order, not visual
//!   order: reordering a list without remounting its items does not reorder
//!   the registry.
//! - Ids are unique. Registering a duplicate id is a no-op.
//! - Every mutation bumps a reactive version counter, so deriveds that read
//!   [`Registry::version`] recompute when items come and go.

use std::cell::{Cell, RefCell};

use spark_signals::{Signal, signal};

// =============================================================================
// Item
// =============================================================================

/// One registered item.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<V> {
    pub id: String,
    pub disabled: bool,
    /// Trimmed, lower-cased text used for typeahead matching.
    pub search_text: String,
    pub value: V,
}

impl<V> Item<V> {
    pub fn new(id: impl Into<String>, value: V) -> Self {
        Self {
            id: id.into(),
            disabled: false,
            search_text: String::new(),
            value,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the display text, normalized for matching.
    pub fn text(mut self, text: &str) -> Self {
        self.search_text = normalize_search_text(text);
        self
    }
}

/// Normalize display text for prefix matching.
pub fn normalize_search_text(text: &str) -> String {
    text.trim().to_lowercase()
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered, id-keyed item storage with a reactive version counter.
pub struct Registry<V> {
    items: RefCell<Vec<Item<V>>>,
    mutations: Cell<u64>,
    version: Signal<u64>,
}

impl<V: Clone> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Registry<V> {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            mutations: Cell::new(0),
            version: signal(0),
        }
    }

    /// Append an item. Returns false (and changes nothing) on a duplicate id.
    pub fn register(&self, item: Item<V>) -> bool {
        {
            let mut items = self.items.borrow_mut();
            if items.iter().any(|existing| existing.id == item.id) {
                tracing::trace!(id = %item.id, "duplicate registration ignored");
                return false;
            }
            items.push(item);
        }
        self.bump();
        true
    }

    /// Remove the item with `id`, preserving the order of the rest.
    pub fn unregister(&self, id: &str) -> Option<Item<V>> {
        let removed = {
            let mut items = self.items.borrow_mut();
            let index = items.iter().position(|item| item.id == id)?;
            items.remove(index)
        };
        self.bump();
        Some(removed)
    }

    /// Change an item's disabled flag. Returns false if the id is unknown.
    pub fn set_disabled(&self, id: &str, disabled: bool) -> bool {
        let changed = {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|item| item.id == id) {
                Some(item) if item.disabled != disabled => {
                    item.disabled = disabled;
                    true
                }
                Some(_) => return true,
                None => return false,
            }
        };
        if changed {
            self.bump();
        }
        true
    }

    /// Snapshot of the current items, in registration order.
    ///
    /// Reading the snapshot tracks the version counter.
    pub fn items(&self) -> Vec<Item<V>> {
        let _ = self.version.get();
        self.items.borrow().clone()
    }

    /// Item with `id`, if registered.
    pub fn get(&self, id: &str) -> Option<Item<V>> {
        let _ = self.version.get();
        self.items.borrow().iter().find(|item| item.id == id).cloned()
    }

    /// Item at `index`, if in range.
    pub fn get_index(&self, index: usize) -> Option<Item<V>> {
        let _ = self.version.get();
        self.items.borrow().get(index).cloned()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        let _ = self.version.get();
        self.items.borrow().iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        let _ = self.version.get();
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mutation counter. Reading it inside a derived/effect subscribes to
    /// every register/unregister.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    // Counter lives outside the signal so mutating inside an effect
    // doesn't subscribe that effect to its own write.
    fn bump(&self) {
        let next = self.mutations.get().wrapping_add(1);
        self.mutations.set(next);
        self.version.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ids(registry: &Registry<()>) -> Vec<String> {
        registry.items().into_iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_register_preserves_order() {
        let registry = Registry::new();
        registry.register(Item::new("a", ()));
        registry.register(Item::new("b", ()));
        registry.register(Item::new("c", ()));
        assert_eq!(ids(&registry), vec!["a", "b", "c"]);
        assert_eq!(registry.index_of("c"), Some(2));
    }

    #[test]
    fn test_duplicate_register_is_noop() {
        let registry = Registry::new();
        assert!(registry.register(Item::new("a", ())));
        let version = registry.version();
        assert!(!registry.register(Item::new("a", ()).disabled(true)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.version(), version);
        assert!(!registry.get("a").unwrap().disabled);
    }

    #[test]
    fn test_unregister_keeps_relative_order() {
        let registry = Registry::new();
        for id in ["a", "b", "c", "d"] {
            registry.register(Item::new(id, ()));
        }
        assert!(registry.unregister("b").is_some());
        assert_eq!(ids(&registry), vec!["a", "c", "d"]);

        // Unknown id is a no-op
        let version = registry.version();
        assert!(registry.unregister("zzz").is_none());
        assert_eq!(registry.version(), version);
    }

    #[test]
    fn test_search_text_is_normalized() {
        let item = Item::new("x", ()).text("  Apple Pie ");
        assert_eq!(item.search_text, "apple pie");
    }

    #[test]
    fn test_set_disabled() {
        let registry = Registry::new();
        registry.register(Item::new("a", ()));
        assert!(registry.set_disabled("a", true));
        assert!(registry.get("a").unwrap().disabled);
        assert!(!registry.set_disabled("missing", true));
    }

    #[test]
    fn test_mutations_notify_effects() {
        let registry = Rc::new(Registry::<()>::new());
        let runs = Rc::new(Cell::new(0));

        let registry_clone = registry.clone();
        let runs_clone = runs.clone();
        let _effect = effect(move || {
            let _ = registry_clone.len();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        registry.register(Item::new("a", ()));
        assert_eq!(runs.get(), 2);

        registry.unregister("a");
        assert_eq!(runs.get(), 3);
    }
}
