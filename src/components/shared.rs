//! Plumbing shared by the disclosure components.

use std::cell::RefCell;
use std::rc::Rc;

use super::types::Cleanup;
use crate::engine::Runtime;
use crate::state::TaskGroup;

/// Next-tick work owned by one component root, cancelled on teardown.
pub(crate) struct Deferred {
    runtime: Runtime,
    tasks: TaskGroup,
}

impl Deferred {
    pub(crate) fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            tasks: TaskGroup::new(),
        }
    }

    /// Run `task` after the current update settles.
    pub(crate) fn next_tick(&self, task: impl FnOnce() + 'static) {
        self.tasks.track(self.runtime.scheduler().next_tick(task));
    }

    /// Move host focus to `id` on the next tick. `None` does nothing.
    pub(crate) fn focus(&self, id: Option<String>) {
        let Some(id) = id else { return };
        let host = self.runtime.focus_host();
        self.next_tick(move || host.focus(&id));
    }

    pub(crate) fn cancel_all(&self) {
        self.tasks.cancel_all();
    }
}

/// Element id slot filled in when the owning part mounts.
#[derive(Default)]
pub(crate) struct ElementSlot {
    id: RefCell<Option<String>>,
}

impl ElementSlot {
    pub(crate) fn set(&self, id: &str) {
        *self.id.borrow_mut() = Some(id.to_string());
    }

    pub(crate) fn clear(&self, id: &str) {
        let mut slot = self.id.borrow_mut();
        if slot.as_deref() == Some(id) {
            slot.take();
        }
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.id.borrow().clone()
    }
}

/// Element ids a disclosure treats as "inside" for outside-click purposes.
#[derive(Clone, Default)]
pub(crate) struct Regions {
    ids: Rc<RefCell<Vec<String>>>,
}

impl Regions {
    pub(crate) fn add(&self, id: &str) {
        let mut ids = self.ids.borrow_mut();
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }

    pub(crate) fn remove(&self, id: &str) {
        self.ids.borrow_mut().retain(|existing| existing != id);
    }

    pub(crate) fn shared(&self) -> Rc<RefCell<Vec<String>>> {
        self.ids.clone()
    }
}

/// `"true"` for set boolean ARIA attributes, omitted otherwise.
pub(crate) fn aria_flag(on: bool) -> Option<&'static str> {
    on.then_some("true")
}

// =============================================================================
// Event Emitter
// =============================================================================

type Handler<T> = Rc<dyn Fn(&T)>;

struct EmitterRegistry<T> {
    handlers: Vec<(usize, Handler<T>)>,
    next_id: usize,
}

/// Listener registry for a component's notifications.
pub(crate) struct Emitter<T> {
    registry: Rc<RefCell<EmitterRegistry<T>>>,
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(EmitterRegistry {
                handlers: Vec::new(),
                next_id: 0,
            })),
        }
    }
}

impl<T: 'static> Emitter<T> {
    /// Register a listener. Returns cleanup function.
    pub(crate) fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Cleanup {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            let handler: Handler<T> = Rc::new(handler);
            reg.handlers.push((id, handler));
            id
        };
        let registry = Rc::downgrade(&self.registry);
        Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().handlers.retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    pub(crate) fn emit(&self, event: &T) {
        let handlers: Vec<Handler<T>> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}
