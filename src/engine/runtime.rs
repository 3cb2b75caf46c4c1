//! Runtime - Collaborators shared by one component tree.
//!
//! A [`Runtime`] bundles everything a component needs from the outside
//! world: the scheduler, id generation, configuration, the host's focus
//! sink and the window-level pointer listener registry.
//!
//! Two independent component trees should use two runtimes (or at least
//! two root scopes); nothing in a runtime is global.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::RaxConfig;
use crate::state::{FocusHost, NullFocusHost, Scheduler};

// =============================================================================
// Id Generation
// =============================================================================

/// Generates unique element ids for one runtime.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: Cell<u64>,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Cell::new(0),
        }
    }

    /// Next id for a component kind, e.g. `raxui-menu-item-3`.
    pub fn next(&self, kind: &str) -> String {
        let n = self.counter.get();
        self.counter.set(n + 1);
        format!("{}-{}-{}", self.prefix, kind, n)
    }
}

// =============================================================================
// Pointer Events
// =============================================================================

/// A pointer event as seen by window-level listeners.
///
/// `path` lists element ids from the event target up to the root, so
/// "is the target inside X" is a membership test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerEvent {
    pub path: Vec<String>,
    pub default_prevented: bool,
}

impl PointerEvent {
    /// Event whose target is `target`, nested inside `ancestors` (innermost first).
    pub fn on(target: &str, ancestors: &[&str]) -> Self {
        let mut path = vec![target.to_string()];
        path.extend(ancestors.iter().map(|a| a.to_string()));
        Self {
            path,
            default_prevented: false,
        }
    }

    /// Event on empty space outside every component.
    pub fn outside() -> Self {
        Self::default()
    }

    /// Whether the target is the element `id` or inside it.
    pub fn is_inside(&self, id: &str) -> bool {
        self.path.iter().any(|p| p == id)
    }
}

/// Handler for window-level pointer events.
pub type PointerHandler = Box<dyn Fn(&PointerEvent)>;

#[derive(Default)]
struct WindowRegistry {
    click_handlers: Vec<(usize, Rc<PointerHandler>)>,
    next_id: usize,
}

/// Window-level pointer listener registry.
#[derive(Clone, Default)]
pub struct WindowEvents {
    registry: Rc<RefCell<WindowRegistry>>,
}

impl WindowEvents {
    /// Subscribe to every click. Returns cleanup function.
    pub fn on_click<F>(&self, handler: F) -> Box<dyn FnOnce()>
    where
        F: Fn(&PointerEvent) + 'static,
    {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            let handler: PointerHandler = Box::new(handler);
            reg.click_handlers.push((id, Rc::new(handler)));
            id
        };

        let registry = Rc::downgrade(&self.registry);
        Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .click_handlers
                    .retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    /// Deliver a click to every listener.
    pub fn dispatch_click(&self, event: &PointerEvent) {
        // Snapshot so handlers may unsubscribe while we iterate
        let handlers: Vec<Rc<PointerHandler>> = self
            .registry
            .borrow()
            .click_handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of active click listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().click_handlers.len()
    }
}

// =============================================================================
// Runtime
// =============================================================================

struct RuntimeInner {
    config: RaxConfig,
    ids: IdGenerator,
    scheduler: Scheduler,
    window: WindowEvents,
    focus: Rc<dyn FocusHost>,
}

/// Shared collaborators for a component tree. Cheap to clone.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RaxConfig::default())
    }
}

impl Runtime {
    /// Runtime with a fresh scheduler and no focus host.
    pub fn new(config: RaxConfig) -> Self {
        Self::with_host(config, Scheduler::new(), Rc::new(NullFocusHost))
    }

    /// Runtime with an explicit scheduler and focus host.
    pub fn with_host(config: RaxConfig, scheduler: Scheduler, focus: Rc<dyn FocusHost>) -> Self {
        let config = config.validated();
        let ids = IdGenerator::new(config.id_prefix.clone());
        Self {
            inner: Rc::new(RuntimeInner {
                config,
                ids,
                scheduler,
                window: WindowEvents::default(),
                focus,
            }),
        }
    }

    pub fn config(&self) -> &RaxConfig {
        &self.inner.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.inner.scheduler
    }

    pub fn window(&self) -> &WindowEvents {
        &self.inner.window
    }

    pub fn focus_host(&self) -> Rc<dyn FocusHost> {
        self.inner.focus.clone()
    }

    /// Generate an element id for a component kind.
    pub fn next_id(&self, kind: &str) -> String {
        self.inner.ids.next(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let runtime = Runtime::new(RaxConfig::default().with_id_prefix("demo"));
        assert_eq!(runtime.next_id("menu-button"), "demo-menu-button-0");
        assert_eq!(runtime.next_id("menu-item"), "demo-menu-item-1");
    }

    #[test]
    fn test_pointer_event_containment() {
        let event = PointerEvent::on("item-2", &["panel", "root"]);
        assert!(event.is_inside("item-2"));
        assert!(event.is_inside("panel"));
        assert!(!event.is_inside("button"));
        assert!(!PointerEvent::outside().is_inside("panel"));
    }

    #[test]
    fn test_click_listener_cleanup() {
        let window = WindowEvents::default();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = window.on_click(move |_| count_clone.set(count_clone.get() + 1));
        assert_eq!(window.listener_count(), 1);

        window.dispatch_click(&PointerEvent::outside());
        assert_eq!(count.get(), 1);

        cleanup();
        assert_eq!(window.listener_count(), 0);

        window.dispatch_click(&PointerEvent::outside());
        assert_eq!(count.get(), 1);
    }
}
