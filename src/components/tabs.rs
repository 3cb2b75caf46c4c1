//! Tabs - A tab list and the panels it switches between.
//!
//! `Tabs` owns the active key. `TabPanels` reads a key from any source
//! (usually [`Tabs::active_signal`]) and hides every `TabPanel` whose key
//! differs, so the two halves can live in different parts of the tree.
//!
//! Arrow keys move focus between enabled tabs; Enter, Space and click
//! activate.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use super::shared::{Emitter, aria_flag};
use super::types::{Cleanup, PropValue};
use crate::engine::{Collection, Focus, Item, Runtime, Scope};
use crate::error::Result;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Key, KeyboardEvent};

pub struct TabsApi {
    runtime: Runtime,
    active: Signal<Option<String>>,
    tabs: Collection<String>,
    changed: Emitter<String>,
}

impl TabsApi {
    pub fn active_key(&self) -> Option<String> {
        self.active.get()
    }

    /// Make `key` the active tab, notifying listeners when it changes.
    pub fn activate_tab(&self, key: &str) {
        if self.active.get().as_deref() == Some(key) {
            return;
        }
        tracing::debug!(key, "tab activated");
        self.active.set(Some(key.to_string()));
        self.changed.emit(&key.to_string());
    }

    /// Move host focus from the tab `from` to a neighbouring enabled tab.
    fn move_focus(&self, from: &str, focus: Focus) {
        let index = self.tabs.registry().index_of(from);
        self.tabs.set_active(index);
        self.tabs.go_to(focus);
        if let Some(id) = self.tabs.active_id() {
            self.runtime.focus_host().focus(&id);
        }
    }
}

// =============================================================================
// Tabs
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct TabsProps {
    /// Initially active key.
    pub value: Option<String>,
}

pub struct Tabs {
    api: Rc<TabsApi>,
    scope: Scope,
    id: String,
}

impl Tabs {
    pub fn new(parent: &Scope, props: TabsProps) -> Result<Self> {
        let runtime = parent.runtime().clone();
        let api = Rc::new(TabsApi {
            active: signal(props.value),
            tabs: Collection::new(&runtime),
            changed: Emitter::default(),
            runtime: runtime.clone(),
        });
        let scope = parent.child();
        scope.provide("Tabs", api.clone())?;
        Ok(Self {
            api,
            scope,
            id: runtime.next_id("tabs"),
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn api(&self) -> Rc<TabsApi> {
        self.api.clone()
    }

    pub fn active_key(&self) -> Option<String> {
        self.api.active_key()
    }

    /// The active key as a signal, for binding a [`TabPanels`].
    pub fn active_signal(&self) -> Signal<Option<String>> {
        self.api.active.clone()
    }

    /// Controlled value. Does not notify.
    pub fn set_value(&self, key: Option<String>) {
        if self.api.active.get() != key {
            self.api.active.set(key);
        }
    }

    pub fn on_change(&self, handler: impl Fn(&String) + 'static) -> Cleanup {
        self.api.changed.subscribe(handler)
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new().with("id", &self.id).with("role", "tablist");
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// Tab
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct TabProps {
    pub key: String,
    pub disabled: bool,
}

impl TabProps {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabSlot {
    pub active: bool,
    pub disabled: bool,
}

pub struct Tab {
    api: Rc<TabsApi>,
    id: String,
    key: String,
    disabled: bool,
}

impl Tab {
    pub fn new(scope: &Scope, props: TabProps) -> Result<Self> {
        let api = scope.require::<TabsApi>("Tab", "Tabs")?;
        let id = scope.runtime().next_id("tab");
        api.tabs
            .register(Item::new(id.clone(), props.key.clone()).disabled(props.disabled));
        Ok(Self {
            api,
            id,
            key: props.key,
            disabled: props.disabled,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.api.active_key().as_deref() == Some(self.key.as_str())
    }

    pub fn handle_click(&self) {
        if !self.disabled {
            self.api.activate_tab(&self.key);
        }
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        let focus = match event.key {
            Key::Enter | Key::Space => {
                self.handle_click();
                return true;
            }
            Key::ArrowRight => Focus::Next,
            Key::ArrowLeft => Focus::Previous,
            Key::Home => Focus::First,
            Key::End => Focus::Last,
            _ => return false,
        };
        self.api.move_focus(&self.id, focus);
        true
    }

    pub fn slot(&self) -> TabSlot {
        TabSlot {
            active: self.is_active(),
            disabled: self.disabled,
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "tab")
            .with("tabindex", if self.disabled { -1 } else { 0 })
            .with("aria-selected", self.is_active())
            .with_opt("aria-disabled", aria_flag(self.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        self.api.tabs.unregister(&self.id);
    }
}

// =============================================================================
// TabPanels / TabPanel
// =============================================================================

pub struct TabPanelsApi {
    active: PropValue<Option<String>>,
}

impl TabPanelsApi {
    pub fn active_key(&self) -> Option<String> {
        self.active.get()
    }
}

pub struct TabPanels {
    scope: Scope,
    id: String,
}

impl TabPanels {
    pub fn new(parent: &Scope, active: impl Into<PropValue<Option<String>>>) -> Result<Self> {
        let api = Rc::new(TabPanelsApi {
            active: active.into(),
        });
        let scope = parent.child();
        scope.provide("TabPanels", api)?;
        Ok(Self {
            scope,
            id: parent.runtime().next_id("tab-panels"),
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "tabpanel")
            .with("tabindex", 0);
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

pub struct TabPanel {
    api: Rc<TabPanelsApi>,
    id: String,
    key: String,
}

impl TabPanel {
    pub fn new(scope: &Scope, key: impl Into<String>) -> Result<Self> {
        let api = scope.require::<TabPanelsApi>("TabPanel", "TabPanels")?;
        Ok(Self {
            id: scope.runtime().next_id("tab-panel"),
            key: key.into(),
            api,
        })
    }

    pub fn is_active(&self) -> bool {
        self.api.active_key().as_deref() == Some(self.key.as_str())
    }

    /// Inactive panels stay mounted but hidden.
    pub fn render(&self) -> Rendered {
        let props = RenderProps {
            unmount: false,
            ..RenderProps::default()
        };
        let attrs = Attrs::new().with("id", &self.id);
        render(Features::RENDER_STRATEGY, self.is_active(), props, attrs)
    }
}
