//! Disclosure - Open/closed state for a trigger + panel pair.
//!
//! ```text
//!            open()
//!   Closed ─────────► Open
//!     ▲                 │
//!     └─────────────────┘
//!            close()   (resets linked active indices)
//! ```
//!
//! `open()` while open and `close()` while closed change nothing. Moving
//! real focus is the caller's job; this machine only owns the state.
//!
//! [`OutsideClick`] is the window-level subscription a disclosure root
//! installs on mount so clicks outside its trigger and panel close it.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::engine::{PointerEvent, WindowEvents};

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Whether the panel is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisclosureState {
    Open,
    #[default]
    Closed,
}

pub struct Disclosure {
    state: Signal<DisclosureState>,
    linked: RefCell<Vec<Signal<Option<usize>>>>,
}

impl Default for Disclosure {
    fn default() -> Self {
        Self::new()
    }
}

impl Disclosure {
    /// A closed disclosure.
    pub fn new() -> Self {
        Self {
            state: signal(DisclosureState::Closed),
            linked: RefCell::new(Vec::new()),
        }
    }

    /// Reset this active index whenever the disclosure closes.
    pub fn link_active(&self, active: Signal<Option<usize>>) {
        self.linked.borrow_mut().push(active);
    }

    /// Current state (reactive).
    pub fn state(&self) -> DisclosureState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get() == DisclosureState::Open
    }

    /// Closed -> Open. Returns whether the state changed.
    pub fn open(&self) -> bool {
        if self.is_open() {
            return false;
        }
        tracing::debug!("disclosure opened");
        self.state.set(DisclosureState::Open);
        true
    }

    /// Open -> Closed. Returns whether the state changed.
    ///
    /// Linked active indices are reset even when already closed.
    pub fn close(&self) -> bool {
        for active in self.linked.borrow().iter() {
            if active.get().is_some() {
                active.set(None);
            }
        }
        if !self.is_open() {
            return false;
        }
        tracing::debug!("disclosure closed");
        self.state.set(DisclosureState::Closed);
        true
    }

    /// Flip the state. Returns the new state.
    pub fn toggle(&self) -> DisclosureState {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.state()
    }

    /// Raw state signal, for consumers building deriveds.
    pub fn signal(&self) -> Signal<DisclosureState> {
        self.state.clone()
    }
}

// =============================================================================
// OUTSIDE CLICK
// =============================================================================

/// A window click subscription that ignores clicks inside given regions.
///
/// Unsubscribes on [`OutsideClick::cancel`] or drop.
pub struct OutsideClick {
    cleanup: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl OutsideClick {
    /// Call `on_outside` for every click whose target is outside all `regions`.
    ///
    /// Region ids are read at click time, so they may be filled in after
    /// the panel mounts.
    pub fn install<F>(window: &WindowEvents, regions: Rc<RefCell<Vec<String>>>, on_outside: F) -> Self
    where
        F: Fn(&PointerEvent) + 'static,
    {
        let cleanup = window.on_click(move |event| {
            let inside = regions.borrow().iter().any(|region| event.is_inside(region));
            if !inside {
                on_outside(event);
            }
        });
        Self {
            cleanup: RefCell::new(Some(cleanup)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.cleanup.borrow().is_some()
    }

    pub fn cancel(&self) {
        if let Some(cleanup) = self.cleanup.borrow_mut().take() {
            cleanup();
        }
    }
}

impl Drop for OutsideClick {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_starts_closed() {
        let disclosure = Disclosure::new();
        assert_eq!(disclosure.state(), DisclosureState::Closed);
        assert!(!disclosure.is_open());
    }

    #[test]
    fn test_open_close_guards() {
        let disclosure = Disclosure::new();
        assert!(disclosure.open());
        assert!(!disclosure.open());
        assert!(disclosure.close());
        assert!(!disclosure.close());
    }

    #[test]
    fn test_close_resets_linked_active() {
        let disclosure = Disclosure::new();
        let active = signal(Some(3usize));
        disclosure.link_active(active.clone());

        disclosure.open();
        disclosure.close();
        assert_eq!(active.get(), None);

        // Even when already closed
        active.set(Some(1));
        disclosure.close();
        assert_eq!(active.get(), None);
    }

    #[test]
    fn test_toggle() {
        let disclosure = Disclosure::new();
        assert_eq!(disclosure.toggle(), DisclosureState::Open);
        assert_eq!(disclosure.toggle(), DisclosureState::Closed);
    }

    #[test]
    fn test_outside_click_exempts_regions() {
        let window = WindowEvents::default();
        let regions = Rc::new(RefCell::new(vec!["button".to_string(), "panel".to_string()]));
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();

        let outside = OutsideClick::install(&window, regions, move |_| {
            hits_clone.set(hits_clone.get() + 1);
        });

        window.dispatch_click(&PointerEvent::on("item", &["panel"]));
        window.dispatch_click(&PointerEvent::on("button", &[]));
        assert_eq!(hits.get(), 0);

        window.dispatch_click(&PointerEvent::on("elsewhere", &["body"]));
        assert_eq!(hits.get(), 1);

        drop(outside);
        assert_eq!(window.listener_count(), 0);
        window.dispatch_click(&PointerEvent::outside());
        assert_eq!(hits.get(), 1);
    }
}
