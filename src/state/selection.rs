//! Selection State - Single or multiple selection over known options.
//!
//! Options are identified by id. Membership, toggling and "already
//! selected?" all compare ids, never values, so values can be arbitrary.
//!
//! - **Single**: selecting replaces the current selection.
//! - **Multiple**: selecting an id already in the set removes it.
//!
//! The selected set is always a subset of the known option ids. Selecting
//! an unknown id is [`RaxError::InvalidOption`]; the one exception is
//! [`SelectionState::select_new`], which registers the option and selects
//! it in the same call. Unregistering an option drops it from the
//! selection.
//!
//! # Example
//!
//! ```
//! use raxui::state::{SelectionMode, SelectionState};
//!
//! let selection = SelectionState::new(SelectionMode::Multiple);
//! selection.register_option("a", "Apple");
//! selection.register_option("b", "Banana");
//!
//! selection.select("a").unwrap();
//! selection.select("b").unwrap();
//! selection.select("a").unwrap();
//! assert_eq!(selection.selected_ids(), vec!["b".to_string()]);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::error::{RaxError, Result};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

/// Notification delivered to [`SelectionState::on_change`] listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent<V> {
    Selected { id: String, value: V },
    Deselected { id: String, value: V },
    /// The selection after a commit, in selection order.
    Changed { ids: Vec<String>, values: Vec<V> },
}

type SelectionHandler<V> = Rc<dyn Fn(&SelectionEvent<V>)>;

// =============================================================================
// SELECTION STATE
// =============================================================================

pub struct SelectionState<V> {
    mode: SelectionMode,
    options: RefCell<Vec<(String, V)>>,
    selected: RefCell<Vec<String>>,
    mutations: Cell<u64>,
    version: Signal<u64>,
    handlers: Rc<RefCell<Vec<(usize, SelectionHandler<V>)>>>,
    next_handler_id: Cell<usize>,
}

impl<V: Clone + 'static> SelectionState<V> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            options: RefCell::new(Vec::new()),
            selected: RefCell::new(Vec::new()),
            mutations: Cell::new(0),
            version: signal(0),
            handlers: Rc::new(RefCell::new(Vec::new())),
            next_handler_id: Cell::new(0),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Add a known option, or replace the value of an existing one.
    pub fn register_option(&self, id: impl Into<String>, value: V) {
        let id = id.into();
        {
            let mut options = self.options.borrow_mut();
            match options.iter_mut().find(|(known, _)| *known == id) {
                Some(entry) => entry.1 = value,
                None => options.push((id, value)),
            }
        }
        self.bump();
    }

    /// Forget an option. A selected option is deselected first.
    pub fn unregister_option(&self, id: &str) {
        let removed = {
            let mut options = self.options.borrow_mut();
            let Some(index) = options.iter().position(|(known, _)| known == id) else {
                return;
            };
            options.remove(index)
        };

        let was_selected = {
            let mut selected = self.selected.borrow_mut();
            let before = selected.len();
            selected.retain(|s| s != id);
            selected.len() != before
        };

        self.bump();
        if was_selected {
            tracing::debug!(id, "selected option unregistered");
            self.emit(&SelectionEvent::Deselected {
                id: removed.0,
                value: removed.1,
            });
            self.emit_changed();
        }
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.options.borrow().iter().any(|(known, _)| known == id)
    }

    pub fn option(&self, id: &str) -> Option<V> {
        let _ = self.version.get();
        self.options
            .borrow()
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, value)| value.clone())
    }

    /// Known options in registration order.
    pub fn options(&self) -> Vec<(String, V)> {
        let _ = self.version.get();
        self.options.borrow().clone()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Selected ids in selection order (reactive).
    pub fn selected_ids(&self) -> Vec<String> {
        let _ = self.version.get();
        self.selected.borrow().clone()
    }

    /// Selected values in selection order (reactive).
    pub fn selected_values(&self) -> Vec<V> {
        let _ = self.version.get();
        let options = self.options.borrow();
        self.selected
            .borrow()
            .iter()
            .filter_map(|id| {
                options
                    .iter()
                    .find(|(known, _)| known == id)
                    .map(|(_, value)| value.clone())
            })
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        let _ = self.version.get();
        self.selected.borrow().iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        let _ = self.version.get();
        self.selected.borrow().is_empty()
    }

    /// Mutation counter (reactive).
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Select `id`.
    ///
    /// Single mode replaces the selection. Selecting the current value again
    /// leaves it in place and only reports [`SelectionEvent::Changed`].
    /// Multiple mode toggles membership.
    pub fn select(&self, id: &str) -> Result<()> {
        match self.mode {
            SelectionMode::Single if self.is_selected(id) => {
                self.require_option(id)?;
                self.emit_changed();
                Ok(())
            }
            SelectionMode::Single => self.add(id),
            SelectionMode::Multiple => self.toggle(id).map(|_| ()),
        }
    }

    /// Select `id` if unselected, deselect it otherwise, in either mode.
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&self, id: &str) -> Result<bool> {
        if self.is_selected(id) {
            self.deselect(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    /// Register a brand-new option and select it in one step.
    pub fn select_new(&self, id: impl Into<String>, value: V) -> Result<()> {
        let id = id.into();
        tracing::debug!(%id, "creating option");
        self.register_option(id.clone(), value);
        if self.is_selected(&id) {
            return Ok(());
        }
        self.add(&id)
    }

    /// Remove `id` from the selection. Returns whether it was selected.
    pub fn deselect(&self, id: &str) -> Result<bool> {
        if !self.is_selected(id) {
            return Ok(false);
        }
        let value = self.option(id).ok_or_else(|| {
            RaxError::StateDesync(format!("selected option {id} is not a known option"))
        })?;
        self.selected.borrow_mut().retain(|s| s != id);
        self.bump();

        tracing::debug!(id, "option deselected");
        self.emit(&SelectionEvent::Deselected {
            id: id.to_string(),
            value,
        });
        self.emit_changed();
        Ok(true)
    }

    /// Deselect the most recently selected option, if any.
    pub fn deselect_last(&self) -> Result<Option<String>> {
        let last = self.selected.borrow().last().cloned();
        match last {
            Some(id) => {
                self.deselect(&id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Replace the whole selection (controlled value).
    ///
    /// Every id must be known. Single mode keeps only the first id.
    pub fn set_selected(&self, ids: &[String]) -> Result<()> {
        for id in ids {
            self.require_option(id)?;
        }
        let next: Vec<String> = match self.mode {
            SelectionMode::Single => ids.iter().take(1).cloned().collect(),
            SelectionMode::Multiple => {
                let mut unique: Vec<String> = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(id) {
                        unique.push(id.clone());
                    }
                }
                unique
            }
        };
        if *self.selected.borrow() == next {
            return Ok(());
        }
        *self.selected.borrow_mut() = next;
        self.bump();
        self.emit_changed();
        Ok(())
    }

    /// Deselect everything.
    pub fn clear(&self) {
        if self.selected.borrow().is_empty() {
            return;
        }
        self.selected.borrow_mut().clear();
        self.bump();
        self.emit_changed();
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Listen for selection events. Returns cleanup function.
    pub fn on_change<F>(&self, handler: F) -> Box<dyn FnOnce()>
    where
        F: Fn(&SelectionEvent<V>) + 'static,
    {
        let id = self.next_handler_id.get();
        self.next_handler_id.set(id + 1);
        let handler: SelectionHandler<V> = Rc::new(handler);
        self.handlers.borrow_mut().push((id, handler));

        let handlers = Rc::downgrade(&self.handlers);
        Box::new(move || {
            if let Some(handlers) = handlers.upgrade() {
                handlers.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn add(&self, id: &str) -> Result<()> {
        let value = self.require_option(id)?;

        let replaced = match self.mode {
            SelectionMode::Single => {
                let previous: Vec<String> = self.selected.borrow_mut().drain(..).collect();
                previous
            }
            SelectionMode::Multiple => Vec::new(),
        };
        self.selected.borrow_mut().push(id.to_string());
        self.bump();

        for old in replaced {
            if let Some(old_value) = self.option(&old) {
                self.emit(&SelectionEvent::Deselected { id: old, value: old_value });
            }
        }
        tracing::debug!(id, "option selected");
        self.emit(&SelectionEvent::Selected {
            id: id.to_string(),
            value,
        });
        self.emit_changed();
        Ok(())
    }

    fn require_option(&self, id: &str) -> Result<V> {
        self.option(id).ok_or_else(|| {
            tracing::warn!(id, "selection of unknown option");
            RaxError::InvalidOption(id.to_string())
        })
    }

    fn emit_changed(&self) {
        let ids = self.selected.borrow().clone();
        let values = self.selected_values();
        self.emit(&SelectionEvent::Changed { ids, values });
    }

    fn emit(&self, event: &SelectionEvent<V>) {
        // Snapshot so handlers may mutate the selection or unsubscribe
        let handlers: Vec<SelectionHandler<V>> =
            self.handlers.borrow().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(event);
        }
    }

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

    fn fruits(mode: SelectionMode) -> SelectionState<&'static str> {
        let selection = SelectionState::new(mode);
        selection.register_option("a", "Apple");
        selection.register_option("b", "Banana");
        selection.register_option("c", "Cherry");
        selection
    }

    fn record(selection: &SelectionState<&'static str>) -> (Rc<RefCell<Vec<SelectionEvent<&'static str>>>>, Box<dyn FnOnce()>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        let cleanup = selection.on_change(move |event| events_clone.borrow_mut().push(event.clone()));
        (events, cleanup)
    }

    #[test]
    fn test_single_replaces() {
        let selection = fruits(SelectionMode::Single);
        selection.select("a").unwrap();
        selection.select("b").unwrap();
        assert_eq!(selection.selected_ids(), vec!["b".to_string()]);
        assert_eq!(selection.selected_values(), vec!["Banana"]);
    }

    #[test]
    fn test_single_reselect_reports_change_only() {
        let selection = fruits(SelectionMode::Single);
        selection.select("a").unwrap();
        let version = selection.version();
        let (events, _cleanup) = record(&selection);
        selection.select("a").unwrap();
        assert_eq!(
            *events.borrow(),
            vec![SelectionEvent::Changed {
                ids: vec!["a".to_string()],
                values: vec!["Apple"],
            }]
        );
        assert!(selection.is_selected("a"));
        assert_eq!(selection.version(), version);
    }

    #[test]
    fn test_multiple_toggles() {
        let selection = fruits(SelectionMode::Multiple);
        selection.select("a").unwrap();
        selection.select("b").unwrap();
        selection.select("a").unwrap();
        assert_eq!(selection.selected_ids(), vec!["b".to_string()]);
    }

    #[test]
    fn test_unknown_id_is_invalid_option() {
        let selection = fruits(SelectionMode::Multiple);
        assert_eq!(
            selection.select("zzz"),
            Err(RaxError::InvalidOption("zzz".to_string()))
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_new_registers_and_selects() {
        let selection = fruits(SelectionMode::Multiple);
        selection.select_new("d", "Durian").unwrap();
        assert!(selection.has_option("d"));
        assert_eq!(selection.selected_values(), vec!["Durian"]);
    }

    #[test]
    fn test_events_for_single_replace() {
        let selection = fruits(SelectionMode::Single);
        selection.select("a").unwrap();
        let (events, _cleanup) = record(&selection);

        selection.select("c").unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                SelectionEvent::Deselected { id: "a".into(), value: "Apple" },
                SelectionEvent::Selected { id: "c".into(), value: "Cherry" },
                SelectionEvent::Changed { ids: vec!["c".into()], values: vec!["Cherry"] },
            ]
        );
    }

    #[test]
    fn test_events_for_multiple_toggle_off() {
        let selection = fruits(SelectionMode::Multiple);
        selection.select("a").unwrap();
        selection.select("b").unwrap();
        let (events, _cleanup) = record(&selection);

        selection.select("a").unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                SelectionEvent::Deselected { id: "a".into(), value: "Apple" },
                SelectionEvent::Changed { ids: vec!["b".into()], values: vec!["Banana"] },
            ]
        );
    }

    #[test]
    fn test_unregister_prunes_selection() {
        let selection = fruits(SelectionMode::Multiple);
        selection.select("a").unwrap();
        selection.select("b").unwrap();
        selection.unregister_option("a");
        assert_eq!(selection.selected_ids(), vec!["b".to_string()]);
        assert!(!selection.has_option("a"));
    }

    #[test]
    fn test_deselect_last() {
        let selection = fruits(SelectionMode::Multiple);
        selection.select("c").unwrap();
        selection.select("a").unwrap();
        assert_eq!(selection.deselect_last().unwrap(), Some("a".to_string()));
        assert_eq!(selection.deselect_last().unwrap(), Some("c".to_string()));
        assert_eq!(selection.deselect_last().unwrap(), None);
    }

    #[test]
    fn test_set_selected_validates_and_dedups() {
        let selection = fruits(SelectionMode::Multiple);
        let ids = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        selection.set_selected(&ids).unwrap();
        assert_eq!(selection.selected_ids(), vec!["b".to_string(), "a".to_string()]);

        let bad = vec!["a".to_string(), "nope".to_string()];
        assert!(selection.set_selected(&bad).is_err());
        assert_eq!(selection.selected_ids(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_listener_cleanup() {
        let selection = fruits(SelectionMode::Single);
        let (events, cleanup) = record(&selection);
        cleanup();
        selection.select("a").unwrap();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_clear() {
        let selection = fruits(SelectionMode::Multiple);
        selection.select("a").unwrap();
        selection.clear();
        assert!(selection.is_empty());
    }
}
