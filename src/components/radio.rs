//! RadioGroup - One checked value among several radios.
//!
//! Arrow keys move to the next / previous enabled radio (wrapping) and
//! check it. Only one radio is in the tab order at a time: the checked one,
//! or the first enabled radio while nothing is checked.

use std::rc::Rc;

use super::shared::{Emitter, aria_flag};
use super::types::Cleanup;
use crate::engine::{Collection, Focus, Item, Runtime, Scope};
use crate::error::Result;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Key, KeyboardEvent, SelectionMode, SelectionState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioGroupSlot {
    pub checked_value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioSlot {
    pub checked: bool,
    pub disabled: bool,
}

pub struct RadioGroupApi {
    runtime: Runtime,
    disabled: bool,
    radios: Collection<String>,
    checked: SelectionState<String>,
    changed: Emitter<String>,
}

impl RadioGroupApi {
    pub fn checked_value(&self) -> Option<String> {
        self.checked.selected_ids().into_iter().next()
    }

    pub fn is_checked(&self, value: &str) -> bool {
        self.checked.is_selected(value)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Check `value`. Emits a change only when the checked value moves.
    pub fn mark_checked(&self, value: &str) -> Result<()> {
        if self.disabled || self.is_checked(value) {
            return Ok(());
        }
        self.checked.select(value)?;
        tracing::debug!(value, "radio checked");
        self.changed.emit(&value.to_string());
        Ok(())
    }

    /// Move to the neighbouring enabled radio, check it and focus it.
    pub fn go_to(&self, focus: Focus) -> Result<()> {
        if self.disabled {
            return Ok(());
        }
        let items = self.radios.items();
        let checked = self.checked_value();
        let current = items
            .iter()
            .position(|item| Some(&item.value) == checked.as_ref())
            .or(self.radios.active_index());
        self.radios.set_active(current);

        self.radios.go_to(focus);
        let Some(item) = self.radios.active_item() else {
            return Ok(());
        };
        self.mark_checked(&item.value)?;
        self.runtime.focus_host().focus(&item.id);
        Ok(())
    }

    /// Radio that owns `tabindex=0`.
    fn tab_stop(&self) -> Option<String> {
        let items = self.radios.items();
        let checked = self.checked_value();
        items
            .iter()
            .find(|item| Some(&item.value) == checked.as_ref())
            .or_else(|| items.iter().find(|item| !item.disabled))
            .map(|item| item.id.clone())
    }
}

// =============================================================================
// RadioGroup
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct RadioGroupProps {
    pub disabled: bool,
}

pub struct RadioGroup {
    api: Rc<RadioGroupApi>,
    scope: Scope,
    id: String,
}

impl RadioGroup {
    pub fn new(parent: &Scope, props: RadioGroupProps) -> Result<Self> {
        let runtime = parent.runtime().clone();
        let api = Rc::new(RadioGroupApi {
            radios: Collection::new(&runtime),
            runtime: runtime.clone(),
            disabled: props.disabled,
            checked: SelectionState::new(SelectionMode::Single),
            changed: Emitter::default(),
        });
        let scope = parent.child();
        scope.provide("RadioGroup", api.clone())?;
        Ok(Self {
            api,
            scope,
            id: runtime.next_id("radio-group"),
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn api(&self) -> Rc<RadioGroupApi> {
        self.api.clone()
    }

    /// Listen for the checked value changing. Returns cleanup function.
    pub fn on_change(&self, handler: impl Fn(&String) + 'static) -> Cleanup {
        self.api.changed.subscribe(handler)
    }

    /// Set the checked value from outside (controlled value).
    pub fn set_value(&self, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.api.checked.set_selected(&[value.to_string()]),
            None => {
                self.api.checked.clear();
                Ok(())
            }
        }
    }

    pub fn slot(&self) -> RadioGroupSlot {
        RadioGroupSlot {
            checked_value: self.api.checked_value(),
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "radiogroup")
            .with("tabindex", -1)
            .with_opt("aria-disabled", aria_flag(self.api.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// Radio
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct RadioProps {
    pub value: String,
    pub disabled: bool,
}

impl RadioProps {
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

pub struct Radio {
    api: Rc<RadioGroupApi>,
    id: String,
    value: String,
    disabled: bool,
}

impl Radio {
    pub fn new(scope: &Scope, props: RadioProps) -> Result<Self> {
        let api = scope.require::<RadioGroupApi>("Radio", "RadioGroup")?;
        let id = scope.runtime().next_id("radio");
        let disabled = props.disabled || api.disabled;
        api.checked.register_option(props.value.clone(), props.value.clone());
        api.radios
            .register(Item::new(id.clone(), props.value.clone()).disabled(disabled));
        Ok(Self {
            api,
            id,
            value: props.value,
            disabled,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_checked(&self) -> bool {
        self.api.is_checked(&self.value)
    }

    /// Click and focus both check the radio.
    pub fn handle_click(&self) -> Result<()> {
        if self.disabled {
            return Ok(());
        }
        self.api.mark_checked(&self.value)
    }

    pub fn handle_focus(&self) -> Result<()> {
        self.handle_click()
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> Result<bool> {
        if !event.is_press() {
            return Ok(false);
        }
        match event.key {
            Key::ArrowRight | Key::ArrowDown => {
                self.api.go_to(Focus::Next)?;
                Ok(true)
            }
            Key::ArrowLeft | Key::ArrowUp => {
                self.api.go_to(Focus::Previous)?;
                Ok(true)
            }
            Key::Space => {
                self.handle_click()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn slot(&self) -> RadioSlot {
        RadioSlot {
            checked: self.is_checked(),
            disabled: self.disabled,
        }
    }

    pub fn render(&self) -> Rendered {
        let checked = self.is_checked();
        let tab_stop = self.api.tab_stop().as_deref() == Some(self.id.as_str());
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "radio")
            .with("tabindex", if tab_stop { 0 } else { -1 })
            .with("aria-checked", checked)
            .with_opt("aria-disabled", aria_flag(self.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for Radio {
    fn drop(&mut self) {
        self.api.radios.unregister(&self.id);
        self.api.checked.unregister_option(&self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaxConfig;
    use crate::state::{RecordingFocusHost, Scheduler};
    use std::cell::RefCell;

    fn setup(values: &[(&str, bool)]) -> (Rc<RecordingFocusHost>, RadioGroup, Vec<Radio>) {
        let host = Rc::new(RecordingFocusHost::new());
        let runtime = Runtime::with_host(RaxConfig::default(), Scheduler::new(), host.clone());
        let root = Scope::root(runtime);
        let group = RadioGroup::new(&root, RadioGroupProps::default()).unwrap();
        let radios = values
            .iter()
            .map(|(value, disabled)| {
                Radio::new(group.scope(), RadioProps::new(*value).disabled(*disabled)).unwrap()
            })
            .collect();
        (host, group, radios)
    }

    #[test]
    fn test_click_checks_one() {
        let (_host, group, radios) = setup(&[("s", false), ("m", false), ("l", false)]);
        radios[1].handle_click().unwrap();
        radios[2].handle_click().unwrap();
        assert_eq!(group.slot().checked_value.as_deref(), Some("l"));
        assert!(!radios[1].is_checked());
    }

    #[test]
    fn test_arrows_wrap_skip_disabled_and_focus() {
        let (host, group, radios) = setup(&[("s", false), ("m", true), ("l", false)]);
        radios[0].handle_click().unwrap();

        radios[0].handle_key_down(&KeyboardEvent::new("ArrowRight")).unwrap();
        assert_eq!(group.slot().checked_value.as_deref(), Some("l"));
        assert_eq!(host.focused().as_deref(), Some(radios[2].id()));

        radios[2].handle_key_down(&KeyboardEvent::new("ArrowDown")).unwrap();
        assert_eq!(group.slot().checked_value.as_deref(), Some("s"));

        radios[0].handle_key_down(&KeyboardEvent::new("ArrowUp")).unwrap();
        assert_eq!(group.slot().checked_value.as_deref(), Some("l"));
    }

    #[test]
    fn test_disabled_radio_ignores_click() {
        let (_host, group, radios) = setup(&[("s", false), ("m", true)]);
        radios[1].handle_click().unwrap();
        assert_eq!(group.slot().checked_value, None);
    }

    #[test]
    fn test_roving_tabindex() {
        let (_host, _group, radios) = setup(&[("s", true), ("m", false), ("l", false)]);
        let tabindex = |radio: &Radio| radio.render().attrs().unwrap().get("tabindex").map(str::to_string);
        assert_eq!(tabindex(&radios[1]).as_deref(), Some("0"));
        assert_eq!(tabindex(&radios[2]).as_deref(), Some("-1"));

        radios[2].handle_click().unwrap();
        assert_eq!(tabindex(&radios[1]).as_deref(), Some("-1"));
        assert_eq!(tabindex(&radios[2]).as_deref(), Some("0"));
        assert_eq!(
            radios[2].render().attrs().unwrap().get("aria-checked"),
            Some("true")
        );
    }

    #[test]
    fn test_change_events_only_on_move() {
        let (_host, group, radios) = setup(&[("s", false), ("m", false)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _cleanup = group.on_change(move |value| seen_clone.borrow_mut().push(value.clone()));

        radios[0].handle_click().unwrap();
        radios[0].handle_focus().unwrap();
        radios[1].handle_click().unwrap();
        assert_eq!(*seen.borrow(), vec!["s".to_string(), "m".to_string()]);
    }

    #[test]
    fn test_disabled_group() {
        let root = Scope::root(Runtime::default());
        let group = RadioGroup::new(&root, RadioGroupProps { disabled: true }).unwrap();
        let radio = Radio::new(group.scope(), RadioProps::new("a")).unwrap();
        radio.handle_click().unwrap();
        assert!(!radio.is_checked());
        assert!(radio.slot().disabled);
    }

    #[test]
    fn test_controlled_value() {
        let (_host, group, radios) = setup(&[("s", false), ("m", false)]);
        group.set_value(Some("m")).unwrap();
        assert!(radios[1].is_checked());
        assert!(group.set_value(Some("xl")).is_err());
        group.set_value(None).unwrap();
        assert_eq!(group.slot().checked_value, None);
    }
}
