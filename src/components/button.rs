//! Button - A focusable element that invokes an action.

use std::rc::Rc;

use super::shared::aria_flag;
use super::types::{Callback, PropValue};
use crate::engine::Scope;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Key, KeyboardEvent};

#[derive(Clone, Default)]
pub struct ButtonProps {
    pub disabled: PropValue<bool>,
    /// Class passed through to the host element.
    pub class: Option<PropValue<String>>,
    pub on_click: Option<Callback>,
}

impl ButtonProps {
    #[must_use]
    pub fn disabled(mut self, disabled: impl Into<PropValue<bool>>) -> Self {
        self.disabled = disabled.into();
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<PropValue<String>>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        let handler: Callback = Rc::new(handler);
        self.on_click = Some(handler);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonSlot {
    pub disabled: bool,
}

pub struct Button {
    id: String,
    props: ButtonProps,
}

impl Button {
    pub fn new(scope: &Scope, props: ButtonProps) -> Self {
        Self {
            id: scope.runtime().next_id("button"),
            props,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_disabled(&self) -> bool {
        self.props.disabled.get()
    }

    /// Returns whether the handler ran.
    pub fn handle_click(&self) -> bool {
        if self.is_disabled() {
            return false;
        }
        match &self.props.on_click {
            Some(on_click) => {
                on_click();
                true
            }
            None => false,
        }
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() || !matches!(event.key, Key::Enter | Key::Space) {
            return false;
        }
        self.handle_click();
        true
    }

    pub fn slot(&self) -> ButtonSlot {
        ButtonSlot {
            disabled: self.is_disabled(),
        }
    }

    pub fn render(&self) -> Rendered {
        let disabled = self.is_disabled();
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "button")
            .with("tabindex", if disabled { -1 } else { 0 })
            .with_opt("aria-disabled", aria_flag(disabled))
            .with_opt("class", self.props.class.as_ref().map(PropValue::get));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}
