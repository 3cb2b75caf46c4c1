//! Modal - A dialog closed through OK / Cancel action buttons.
//!
//! Closing always hides the modal and then reports which action closed it.
//! Escape anywhere inside the modal counts as Cancel.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use super::shared::Emitter;
use super::types::Cleanup;
use crate::engine::Scope;
use crate::error::Result;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Key, KeyboardEvent};

/// Which action closed the modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalAction {
    #[default]
    Ok,
    Cancel,
}

pub struct ModalApi {
    visible: Signal<bool>,
    closed: Emitter<ModalAction>,
}

impl ModalApi {
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn open(&self) {
        if !self.visible.get() {
            self.visible.set(true);
        }
    }

    /// Hide the modal and report `action`.
    pub fn close_modal(&self, action: ModalAction) {
        tracing::debug!(?action, "modal closed");
        if self.visible.get() {
            self.visible.set(false);
        }
        self.closed.emit(&action);
    }
}

// =============================================================================
// Modal
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct ModalProps {
    pub visible: bool,
    pub render: RenderProps,
}

impl Default for ModalProps {
    fn default() -> Self {
        Self {
            visible: true,
            render: RenderProps::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalSlot {
    pub visible: bool,
}

pub struct Modal {
    api: Rc<ModalApi>,
    scope: Scope,
    id: String,
    render_props: RenderProps,
}

impl Modal {
    pub fn new(parent: &Scope, props: ModalProps) -> Result<Self> {
        let api = Rc::new(ModalApi {
            visible: signal(props.visible),
            closed: Emitter::default(),
        });
        let scope = parent.child();
        scope.provide("Modal", api.clone())?;
        Ok(Self {
            api,
            scope,
            id: parent.runtime().next_id("modal"),
            render_props: props.render,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn api(&self) -> Rc<ModalApi> {
        self.api.clone()
    }

    pub fn visible_signal(&self) -> Signal<bool> {
        self.api.visible.clone()
    }

    pub fn on_close(&self, handler: impl Fn(&ModalAction) + 'static) -> Cleanup {
        self.api.closed.subscribe(handler)
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() || event.key != Key::Escape || !self.api.is_visible() {
            return false;
        }
        self.api.close_modal(ModalAction::Cancel);
        true
    }

    pub fn slot(&self) -> ModalSlot {
        ModalSlot {
            visible: self.api.is_visible(),
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "dialog")
            .with("aria-modal", true)
            .with("tabindex", 0);
        render(
            Features::RENDER_STRATEGY | Features::STATIC,
            self.api.is_visible(),
            self.render_props,
            attrs,
        )
    }
}

// =============================================================================
// ModalActionButton
// =============================================================================

pub struct ModalActionButton {
    api: Rc<ModalApi>,
    id: String,
    action: ModalAction,
}

impl ModalActionButton {
    pub fn new(scope: &Scope, action: ModalAction) -> Result<Self> {
        let api = scope.require::<ModalApi>("ModalActionButton", "Modal")?;
        Ok(Self {
            id: scope.runtime().next_id("modal-action"),
            api,
            action,
        })
    }

    pub fn action(&self) -> ModalAction {
        self.action
    }

    pub fn handle_click(&self) {
        self.api.close_modal(self.action);
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if event.is_press() && matches!(event.key, Key::Enter | Key::Space) {
            self.handle_click();
            return true;
        }
        false
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "button")
            .with("tabindex", 0);
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Runtime;
    use std::cell::RefCell;

    fn modal() -> (Modal, Rc<RefCell<Vec<ModalAction>>>, Cleanup) {
        let root = Scope::root(Runtime::default());
        let modal = Modal::new(&root, ModalProps::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let cleanup = modal.on_close(move |action| sink.borrow_mut().push(*action));
        (modal, seen, cleanup)
    }

    #[test]
    fn test_action_buttons_close() {
        let (modal, seen, _cleanup) = modal();
        let ok = ModalActionButton::new(modal.scope(), ModalAction::Ok).unwrap();
        let cancel = ModalActionButton::new(modal.scope(), ModalAction::Cancel).unwrap();

        ok.handle_click();
        assert!(!modal.slot().visible);
        modal.api().open();
        assert!(cancel.handle_key_down(&KeyboardEvent::new("Enter")));

        assert_eq!(*seen.borrow(), vec![ModalAction::Ok, ModalAction::Cancel]);
    }

    #[test]
    fn test_escape_cancels_only_while_visible() {
        let (modal, seen, _cleanup) = modal();
        assert!(modal.handle_key_down(&KeyboardEvent::new("Escape")));
        assert!(!modal.handle_key_down(&KeyboardEvent::new("Escape")));
        assert_eq!(*seen.borrow(), vec![ModalAction::Cancel]);
    }

    #[test]
    fn test_render_follows_visibility() {
        let (modal, _seen, _cleanup) = modal();
        let shown = modal.render();
        assert_eq!(shown.attrs().unwrap().get("role"), Some("dialog"));
        modal.visible_signal().set(false);
        assert!(modal.render().is_omitted());
    }

    #[test]
    fn test_action_button_needs_modal() {
        let root = Scope::root(Runtime::default());
        let err = ModalActionButton::new(&root, ModalAction::Ok).err().unwrap();
        assert_eq!(
            err.to_string(),
            "<ModalActionButton /> is missing a parent <Modal /> component."
        );
    }
}
