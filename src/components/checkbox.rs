//! CheckboxGroup - Independent on/off choices sharing one value list.
//!
//! Space, Enter and click toggle a checkbox. Every toggle reports the value
//! that flipped together with the full list of checked values.
//!
//! # Example
//!
//! ```ignore
//! let group = CheckboxGroup::new(&scope, CheckboxGroupProps::default())?;
//! let _cleanup = group.on_change(|event| println!("{event:?}"));
//! let tea = Checkbox::new(group.scope(), CheckboxProps::new("tea"))?;
//! tea.handle_click()?;
//! ```

use std::rc::Rc;

use super::shared::{Emitter, aria_flag};
use super::types::Cleanup;
use crate::engine::Scope;
use crate::error::Result;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Key, KeyboardEvent, SelectionMode, SelectionState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckboxEvent {
    Checked { value: String, checked: Vec<String> },
    Unchecked { value: String, checked: Vec<String> },
}

impl CheckboxEvent {
    /// Checked values after the toggle.
    pub fn checked_values(&self) -> &[String] {
        match self {
            CheckboxEvent::Checked { checked, .. } | CheckboxEvent::Unchecked { checked, .. } => {
                checked
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckboxSlot {
    pub checked: bool,
    pub disabled: bool,
}

pub struct CheckboxGroupApi {
    disabled: bool,
    checked: SelectionState<String>,
    changed: Emitter<CheckboxEvent>,
}

impl CheckboxGroupApi {
    pub fn checked_values(&self) -> Vec<String> {
        self.checked.selected_ids()
    }

    pub fn is_checked(&self, value: &str) -> bool {
        self.checked.is_selected(value)
    }

    /// Flip `value`. Returns whether it is checked afterwards.
    pub fn mark_checked(&self, value: &str) -> Result<bool> {
        if self.disabled {
            return Ok(self.is_checked(value));
        }
        let now_checked = self.checked.toggle(value)?;
        let checked = self.checked_values();
        tracing::debug!(value, now_checked, "checkbox toggled");
        let event = if now_checked {
            CheckboxEvent::Checked {
                value: value.to_string(),
                checked,
            }
        } else {
            CheckboxEvent::Unchecked {
                value: value.to_string(),
                checked,
            }
        };
        self.changed.emit(&event);
        Ok(now_checked)
    }
}

// =============================================================================
// CheckboxGroup
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct CheckboxGroupProps {
    pub disabled: bool,
}

pub struct CheckboxGroup {
    api: Rc<CheckboxGroupApi>,
    scope: Scope,
    id: String,
}

impl CheckboxGroup {
    pub fn new(parent: &Scope, props: CheckboxGroupProps) -> Result<Self> {
        let api = Rc::new(CheckboxGroupApi {
            disabled: props.disabled,
            checked: SelectionState::new(SelectionMode::Multiple),
            changed: Emitter::default(),
        });
        let scope = parent.child();
        scope.provide("CheckboxGroup", api.clone())?;
        Ok(Self {
            api,
            id: parent.runtime().next_id("checkbox-group"),
            scope,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn api(&self) -> Rc<CheckboxGroupApi> {
        self.api.clone()
    }

    pub fn on_change(&self, handler: impl Fn(&CheckboxEvent) + 'static) -> Cleanup {
        self.api.changed.subscribe(handler)
    }

    /// Replace the checked values (controlled value). No event is emitted.
    pub fn set_values(&self, values: &[String]) -> Result<()> {
        self.api.checked.set_selected(values)
    }

    pub fn checked_values(&self) -> Vec<String> {
        self.api.checked_values()
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "group")
            .with("tabindex", -1)
            .with_opt("aria-disabled", aria_flag(self.api.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// Checkbox
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct CheckboxProps {
    pub value: String,
    pub disabled: bool,
}

impl CheckboxProps {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

pub struct Checkbox {
    api: Rc<CheckboxGroupApi>,
    id: String,
    value: String,
    disabled: bool,
}

impl Checkbox {
    pub fn new(scope: &Scope, props: CheckboxProps) -> Result<Self> {
        let api = scope.require::<CheckboxGroupApi>("Checkbox", "CheckboxGroup")?;
        api.checked.register_option(props.value.clone(), props.value.clone());
        Ok(Self {
            disabled: props.disabled || api.disabled,
            id: scope.runtime().next_id("checkbox"),
            value: props.value,
            api,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_checked(&self) -> bool {
        self.api.is_checked(&self.value)
    }

    pub fn handle_click(&self) -> Result<()> {
        if self.disabled {
            return Ok(());
        }
        self.api.mark_checked(&self.value).map(|_| ())
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> Result<bool> {
        if !event.is_press() {
            return Ok(false);
        }
        match event.key {
            Key::Space | Key::Enter => {
                self.handle_click()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn slot(&self) -> CheckboxSlot {
        CheckboxSlot {
            checked: self.is_checked(),
            disabled: self.disabled,
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "checkbox")
            .with("tabindex", if self.disabled { -1 } else { 0 })
            .with("aria-checked", self.is_checked())
            .with_opt("aria-disabled", aria_flag(self.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for Checkbox {
    fn drop(&mut self) {
        self.api.checked.unregister_option(&self.value);
    }
}
