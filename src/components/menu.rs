//! Menu - A button that opens a list of actions.
//!
//! ```text
//! Menu
//! ├─ MenuButton     Space/Enter/ArrowDown open + first, ArrowUp open + last
//! └─ MenuItems      arrows, Home/End, typeahead, Enter activates, Escape closes
//!    ├─ MenuItem    click activates, hover/focus makes active
//!    └─ MenuItem
//! ```
//!
//! The root owns the disclosure and the item collection and provides a
//! [`MenuApi`] handle into its scope. Parts mounted outside a `Menu` fail
//! with [`RaxError::MissingContext`](crate::RaxError::MissingContext).
//!
//! # Example
//!
//! ```
//! use raxui::components::{Menu, MenuButton, MenuButtonProps, MenuItem, MenuItemProps, MenuItems};
//! use raxui::engine::{Runtime, Scope};
//! use raxui::render::RenderProps;
//! use raxui::state::KeyboardEvent;
//!
//! let runtime = Runtime::default();
//! let root = Scope::root(runtime.clone());
//!
//! let menu = Menu::new(&root).unwrap();
//! let button = MenuButton::new(menu.scope(), MenuButtonProps::default()).unwrap();
//! let items = MenuItems::new(menu.scope(), RenderProps::default()).unwrap();
//! let _edit = MenuItem::new(menu.scope(), MenuItemProps::new("Edit")).unwrap();
//! let _copy = MenuItem::new(menu.scope(), MenuItemProps::new("Copy")).unwrap();
//!
//! button.handle_key_down(&KeyboardEvent::new("ArrowUp"));
//! runtime.scheduler().flush();
//! assert!(menu.slot().open);
//! assert_eq!(items.active_index(), Some(1));
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::shared::{Deferred, ElementSlot, Regions, aria_flag};
use super::types::Callback;
use crate::engine::{Collection, Focus, Item, PointerEvent, Runtime, Scope};
use crate::error::Result;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Disclosure, DisclosureState, Key, KeyboardEvent, OutsideClick};

// =============================================================================
// Shared API
// =============================================================================

/// Per-item data stored in the registry.
#[derive(Clone, Default)]
pub struct MenuItemData {
    on_click: Option<Callback>,
}

/// Slot data for the menu root, button and panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuSlot {
    pub open: bool,
}

/// Slot data for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItemSlot {
    pub active: bool,
    pub disabled: bool,
}

/// Handle the menu root provides to its parts.
pub struct MenuApi {
    me: Weak<MenuApi>,
    runtime: Runtime,
    disclosure: Disclosure,
    items: Collection<MenuItemData>,
    button: ElementSlot,
    panel: ElementSlot,
    regions: Regions,
    deferred: Deferred,
    outside: RefCell<Option<OutsideClick>>,
}

impl MenuApi {
    fn new(runtime: Runtime) -> Rc<Self> {
        Rc::new_cyclic(|me| {
            let items = Collection::new(&runtime);
            let disclosure = Disclosure::new();
            disclosure.link_active(items.active_signal());
            Self {
                me: me.clone(),
                deferred: Deferred::new(runtime.clone()),
                runtime,
                disclosure,
                items,
                button: ElementSlot::default(),
                panel: ElementSlot::default(),
                regions: Regions::default(),
                outside: RefCell::new(None),
            }
        })
    }

    pub fn state(&self) -> DisclosureState {
        self.disclosure.state()
    }

    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    pub fn open(&self) {
        self.disclosure.open();
    }

    /// Close the panel, clearing the active item and the typeahead query.
    /// Focus work queued while open is dropped.
    pub fn close(&self) {
        self.deferred.cancel_all();
        self.disclosure.close();
        self.items.clear_search();
    }

    pub fn go_to(&self, focus: Focus) {
        self.items.go_to(focus);
    }

    pub fn search(&self, ch: char) {
        self.items.search(ch);
    }

    pub fn clear_search(&self) {
        self.items.clear_search();
    }

    pub fn items(&self) -> &Collection<MenuItemData> {
        &self.items
    }

    pub fn button_id(&self) -> Option<String> {
        self.button.get()
    }

    pub fn panel_id(&self) -> Option<String> {
        self.panel.get()
    }

    fn slot(&self) -> MenuSlot {
        MenuSlot {
            open: self.is_open(),
        }
    }

    fn focus_button_later(&self) {
        self.deferred.focus(self.button.get());
    }

    /// After the panel renders: focus it, then optionally move the active item.
    fn focus_panel_later(&self, focus: Option<Focus>) {
        let me = self.me.clone();
        self.deferred.next_tick(move || {
            let Some(api) = me.upgrade() else { return };
            if !api.is_open() {
                return;
            }
            if let Some(id) = api.panel.get() {
                api.runtime.focus_host().focus(&id);
            }
            if let Some(focus) = focus {
                api.go_to(focus);
            }
        });
    }

    /// Run an item's action and close. Returns true if the click was prevented.
    fn activate(&self, item: &Item<MenuItemData>) -> bool {
        if item.disabled {
            return true;
        }
        tracing::debug!(id = %item.id, "menu item activated");
        if let Some(on_click) = &item.value.on_click {
            on_click();
        }
        self.close();
        self.focus_button_later();
        false
    }

    fn handle_outside_click(&self, event: &PointerEvent) {
        if !self.is_open() {
            return;
        }
        self.close();
        if !event.default_prevented {
            self.focus_button_later();
        }
    }

    fn teardown(&self) {
        if let Some(outside) = self.outside.borrow_mut().take() {
            outside.cancel();
        }
        self.deferred.cancel_all();
        self.items.clear_search();
    }
}

// =============================================================================
// Menu
// =============================================================================

/// Menu root.
pub struct Menu {
    api: Rc<MenuApi>,
    scope: Scope,
}

impl Menu {
    pub fn new(parent: &Scope) -> Result<Self> {
        let runtime = parent.runtime().clone();
        let api = MenuApi::new(runtime.clone());
        let scope = parent.child();
        scope.provide("Menu", api.clone())?;

        let weak = Rc::downgrade(&api);
        let outside = OutsideClick::install(runtime.window(), api.regions.shared(), move |event| {
            if let Some(api) = weak.upgrade() {
                api.handle_outside_click(event);
            }
        });
        *api.outside.borrow_mut() = Some(outside);

        Ok(Self { api, scope })
    }

    /// Scope to mount the menu's parts into.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn api(&self) -> Rc<MenuApi> {
        self.api.clone()
    }

    pub fn slot(&self) -> MenuSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        render(Features::NONE, true, RenderProps::default(), Attrs::new())
    }
}

impl Drop for Menu {
    fn drop(&mut self) {
        self.api.teardown();
    }
}

// =============================================================================
// MenuButton
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MenuButtonProps {
    pub disabled: bool,
}

pub struct MenuButton {
    api: Rc<MenuApi>,
    id: String,
    disabled: bool,
}

impl MenuButton {
    pub fn new(scope: &Scope, props: MenuButtonProps) -> Result<Self> {
        let api = scope.require::<MenuApi>("MenuButton", "Menu")?;
        let id = scope.runtime().next_id("menu-button");
        api.button.set(&id);
        api.regions.add(&id);
        Ok(Self {
            api,
            id,
            disabled: props.disabled,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if self.disabled || !event.is_press() {
            return false;
        }
        match event.key {
            Key::Space | Key::Enter | Key::ArrowDown => {
                self.api.open();
                self.api.focus_panel_later(Some(Focus::First));
                true
            }
            Key::ArrowUp => {
                self.api.open();
                self.api.focus_panel_later(Some(Focus::Last));
                true
            }
            _ => false,
        }
    }

    /// Toggle on pointer release. Returns true when the default was prevented.
    pub fn handle_pointer_up(&self) -> bool {
        if self.disabled {
            return false;
        }
        if self.api.is_open() {
            self.api.close();
            self.api.focus_button_later();
            false
        } else {
            self.api.open();
            self.api.focus_panel_later(None);
            true
        }
    }

    /// Focus landing on the button while open is forwarded to the panel.
    pub fn handle_focus(&self) {
        if !self.api.is_open() {
            return;
        }
        if let Some(panel) = self.api.panel.get() {
            self.api.runtime.focus_host().focus(&panel);
        }
    }

    pub fn slot(&self) -> MenuSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let open = self.api.is_open();
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("type", "button")
            .with("aria-haspopup", true)
            .with_opt("aria-controls", self.api.panel.get())
            .with_opt("aria-expanded", aria_flag(open))
            .with_opt("disabled", aria_flag(self.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for MenuButton {
    fn drop(&mut self) {
        self.api.button.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

// =============================================================================
// MenuItems
// =============================================================================

/// The floating panel holding the items.
pub struct MenuItems {
    api: Rc<MenuApi>,
    id: String,
    props: RenderProps,
}

impl MenuItems {
    pub fn new(scope: &Scope, props: RenderProps) -> Result<Self> {
        let api = scope.require::<MenuApi>("MenuItems", "Menu")?;
        let id = scope.runtime().next_id("menu-items");
        api.panel.set(&id);
        api.regions.add(&id);
        Ok(Self { api, id, props })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn active_index(&self) -> Option<usize> {
        self.api.items.active_index()
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        let api = &self.api;
        match event.key {
            // Space types into an ongoing search, otherwise acts as Enter
            Key::Space if !api.items.query().is_empty() => {
                api.search(' ');
                true
            }
            Key::Space | Key::Enter => {
                if let Some(item) = api.items.active_item() {
                    api.activate(&item);
                }
                api.close();
                api.focus_button_later();
                true
            }
            Key::ArrowDown => {
                api.go_to(Focus::Next);
                true
            }
            Key::ArrowUp => {
                api.go_to(Focus::Previous);
                true
            }
            Key::Home | Key::PageUp => {
                api.go_to(Focus::First);
                true
            }
            Key::End | Key::PageDown => {
                api.go_to(Focus::Last);
                true
            }
            Key::Escape => {
                api.close();
                api.focus_button_later();
                true
            }
            Key::Tab => true,
            _ => match event.printable_char() {
                Some(ch) => {
                    api.search(ch);
                    true
                }
                None => false,
            },
        }
    }

    pub fn slot(&self) -> MenuSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let open = self.api.is_open();
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "menu")
            .with("tabindex", 0)
            .with_opt("aria-activedescendant", self.api.items.active_id())
            .with_opt("aria-labelledby", self.api.button.get());
        render(Features::RENDER_STRATEGY | Features::STATIC, open, self.props, attrs)
    }
}

impl Drop for MenuItems {
    fn drop(&mut self) {
        self.api.panel.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

// =============================================================================
// MenuItem
// =============================================================================

#[derive(Clone, Default)]
pub struct MenuItemProps {
    /// Display text, used for typeahead.
    pub text: String,
    pub disabled: bool,
    pub on_click: Option<Callback>,
}

impl MenuItemProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn on_click(mut self, on_click: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }
}

/// One action. Registers on creation, unregisters on drop.
pub struct MenuItem {
    api: Rc<MenuApi>,
    id: String,
    disabled: bool,
}

impl MenuItem {
    pub fn new(scope: &Scope, props: MenuItemProps) -> Result<Self> {
        let api = scope.require::<MenuApi>("MenuItem", "Menu")?;
        let id = scope.runtime().next_id("menu-item");
        let data = MenuItemData {
            on_click: props.on_click,
        };
        api.items
            .register(Item::new(id.clone(), data).text(&props.text).disabled(props.disabled));
        Ok(Self {
            api,
            id,
            disabled: props.disabled,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.api.items.is_active(&self.id)
    }

    /// Returns true when the click was prevented (disabled item).
    pub fn handle_click(&self) -> bool {
        match self.api.items.registry().get(&self.id) {
            Some(item) => self.api.activate(&item),
            None => true,
        }
    }

    pub fn handle_focus(&self) {
        if self.disabled {
            self.api.go_to(Focus::Nothing);
        } else {
            self.api.go_to(Focus::specific(self.id.clone()));
        }
    }

    pub fn handle_pointer_move(&self) {
        if self.disabled || self.is_active() {
            return;
        }
        self.api.go_to(Focus::specific(self.id.clone()));
    }

    pub fn handle_pointer_leave(&self) {
        if self.disabled || !self.is_active() {
            return;
        }
        self.api.go_to(Focus::Nothing);
    }

    pub fn slot(&self) -> MenuItemSlot {
        MenuItemSlot {
            active: self.is_active(),
            disabled: self.disabled,
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "menuitem")
            .with("tabindex", -1)
            .with_opt("aria-disabled", aria_flag(self.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for MenuItem {
    fn drop(&mut self) {
        self.api.items.unregister(&self.id);
    }
}
