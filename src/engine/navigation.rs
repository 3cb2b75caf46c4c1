//! Active-Index Resolver - Where does "virtual focus" go next?
//!
//! A pure function from a navigation intent, an item list and the current
//! active index to the next active index. Every list-like component (menu,
//! select, radio group, tabs, tag menu) routes keyboard navigation through
//! [`resolve_active_index`].
//!
//! Rules:
//!
//! - Disabled items are never returned.
//! - `First` / `Last` scan from the start / end of the list.
//! - `Next` / `Previous` scan from the neighbour of the current index and
//!   wrap around. With no current index they behave like `First` / `Last`.
//! - When no candidate qualifies the current index is kept, as long as it
//!   still points at an enabled item; otherwise the result is `None`.
//! - `Specific(id)` returns the index of that item if it is enabled,
//!   otherwise it behaves like "no candidate".
//! - `Nothing` and an empty list always give `None`.
//!
//! # Example
//!
//! ```
//! use raxui::engine::{Focus, Item, resolve};
//!
//! let items = vec![
//!     Item::new("1", ()),
//!     Item::new("2", ()).disabled(true),
//!     Item::new("3", ()),
//! ];
//! let first = resolve(&Focus::First, &items, None);
//! assert_eq!(first, Some(0));
//! assert_eq!(resolve(&Focus::Next, &items, first), Some(2));
//! assert_eq!(resolve(&Focus::Next, &items, Some(2)), Some(0));
//! ```

use super::registry::Item;

/// Navigation intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    First,
    Last,
    Next,
    Previous,
    /// The item with this id.
    Specific(String),
    /// Clear the active item.
    Nothing,
}

impl Focus {
    pub fn specific(id: impl Into<String>) -> Self {
        Focus::Specific(id.into())
    }
}

/// Resolve the next active index over any item type.
pub fn resolve_active_index<T>(
    focus: &Focus,
    items: &[T],
    current: Option<usize>,
    id_of: impl Fn(&T) -> &str,
    disabled_of: impl Fn(&T) -> bool,
) -> Option<usize> {
    let len = items.len();
    if len == 0 {
        return None;
    }

    let enabled = |index: usize| !disabled_of(&items[index]);

    // A stale index (past the end, or now disabled) counts as nothing.
    let current = current.filter(|&index| index < len);
    let fallback = current.filter(|&index| enabled(index));

    let found = match focus {
        Focus::Nothing => return None,
        Focus::Specific(id) => items
            .iter()
            .position(|item| id_of(item) == id)
            .filter(|&index| enabled(index)),
        Focus::First => (0..len).find(|&index| enabled(index)),
        Focus::Last => (0..len).rev().find(|&index| enabled(index)),
        Focus::Next => {
            let start = current.map_or(0, |index| index + 1);
            (0..len)
                .map(|offset| (start + offset) % len)
                .find(|&index| enabled(index))
        }
        Focus::Previous => {
            let start = current.map_or(len - 1, |index| index + len - 1);
            (0..len)
                .map(|offset| (start + len - offset) % len)
                .find(|&index| enabled(index))
        }
    };

    found.or(fallback)
}

/// Resolve over registry items.
pub fn resolve<V>(focus: &Focus, items: &[Item<V>], current: Option<usize>) -> Option<usize> {
    resolve_active_index(focus, items, current, |item| item.id.as_str(), |item| item.disabled)
}

/// Re-derive the active index after the list changed.
///
/// Follows identity, not position: the item that was active keeps being
/// active at its new index, or nothing is active if it left the list.
pub fn resync_active_index<V>(active_id: Option<&str>, items: &[Item<V>]) -> Option<usize> {
    let id = active_id?;
    items.iter().position(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(disabled: &[bool]) -> Vec<Item<()>> {
        disabled
            .iter()
            .enumerate()
            .map(|(i, &d)| Item::new((i + 1).to_string(), ()).disabled(d))
            .collect()
    }

    #[test]
    fn test_end_to_end_skip_and_wrap() {
        let list = items(&[false, true, false]);
        let first = resolve(&Focus::First, &list, None);
        assert_eq!(first, Some(0));
        let next = resolve(&Focus::Next, &list, first);
        assert_eq!(next, Some(2));
        assert_eq!(resolve(&Focus::Next, &list, next), Some(0));
    }

    #[test]
    fn test_empty_list_is_always_none() {
        let list = items(&[]);
        for focus in [Focus::First, Focus::Last, Focus::Next, Focus::Previous, Focus::specific("1")] {
            assert_eq!(resolve(&focus, &list, None), None);
            assert_eq!(resolve(&focus, &list, Some(3)), None);
        }
    }

    #[test]
    fn test_nothing_clears() {
        let list = items(&[false, false]);
        assert_eq!(resolve(&Focus::Nothing, &list, Some(1)), None);
    }

    #[test]
    fn test_first_and_last_skip_disabled_edges() {
        let list = items(&[true, false, false, true]);
        assert_eq!(resolve(&Focus::First, &list, Some(2)), Some(1));
        assert_eq!(resolve(&Focus::Last, &list, Some(1)), Some(2));
    }

    #[test]
    fn test_next_and_previous_from_none() {
        let list = items(&[false, false, false]);
        assert_eq!(resolve(&Focus::Next, &list, None), Some(0));
        assert_eq!(resolve(&Focus::Previous, &list, None), Some(2));
    }

    #[test]
    fn test_previous_wraps_backwards() {
        let list = items(&[false, true, false, false]);
        assert_eq!(resolve(&Focus::Previous, &list, Some(2)), Some(0));
        assert_eq!(resolve(&Focus::Previous, &list, Some(0)), Some(3));
    }

    #[test]
    fn test_specific() {
        let list = items(&[false, true, false]);
        assert_eq!(resolve(&Focus::specific("3"), &list, None), Some(2));
        // Disabled target keeps the current index
        assert_eq!(resolve(&Focus::specific("2"), &list, Some(0)), Some(0));
        // Unknown target keeps the current index
        assert_eq!(resolve(&Focus::specific("nope"), &list, Some(2)), Some(2));
        assert_eq!(resolve(&Focus::specific("nope"), &list, None), None);
    }

    #[test]
    fn test_all_disabled_never_returns_disabled() {
        let list = items(&[true, true, true]);
        for focus in [Focus::First, Focus::Last, Focus::Next, Focus::Previous] {
            assert_eq!(resolve(&focus, &list, None), None);
            assert_eq!(resolve(&focus, &list, Some(1)), None);
        }
    }

    #[test]
    fn test_single_enabled_item_stays_put() {
        let list = items(&[true, false, true]);
        assert_eq!(resolve(&Focus::Next, &list, Some(1)), Some(1));
        assert_eq!(resolve(&Focus::Previous, &list, Some(1)), Some(1));
    }

    #[test]
    fn test_stale_index_is_ignored() {
        let list = items(&[false, false]);
        assert_eq!(resolve(&Focus::Next, &list, Some(9)), Some(0));
        assert_eq!(resolve(&Focus::specific("nope"), &list, Some(9)), None);
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        let patterns: [&[bool]; 4] = [
            &[false, false, false],
            &[false, true, false, true, false],
            &[true, false],
            &[false],
        ];
        for pattern in patterns {
            let list = items(pattern);
            let start = resolve(&Focus::First, &list, None);
            let enabled = pattern.iter().filter(|d| !**d).count();
            let mut current = start;
            for _ in 0..enabled {
                current = resolve(&Focus::Next, &list, current);
                assert!(!list[current.unwrap()].disabled);
            }
            assert_eq!(current, start, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_resync_follows_identity() {
        let mut list = items(&[false, false, false]);
        // "3" was active at index 2; "1" goes away
        list.remove(0);
        assert_eq!(resync_active_index(Some("3"), &list), Some(1));
        // Active item itself goes away
        assert_eq!(resync_active_index(Some("1"), &list), None);
        assert_eq!(resync_active_index(None, &list), None);
    }

    #[test]
    fn test_generic_accessors() {
        let rows = [("a", true), ("b", false)];
        let index = resolve_active_index(&Focus::First, &rows, None, |row| row.0, |row| row.1);
        assert_eq!(index, Some(1));
    }
}
