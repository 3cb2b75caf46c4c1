//! Select - A listbox of options behind a button.
//!
//! ```text
//! Select<V>
//! ├─ SelectLabel        pointer-up focuses the button
//! ├─ SelectButton       Space/Enter/ArrowDown open, ArrowUp open at the end
//! ├─ SelectSearchBox    optional; when mounted, opening focuses it
//! └─ SelectOptions      arrows, Home/End, typeahead, Enter selects
//!    ├─ SelectOption    key + value
//!    └─ SelectOption
//! ```
//!
//! Options are compared by key: the consumer's key when given, the
//! generated element id otherwise. Values themselves are never compared.
//!
//! In single mode committing a choice closes the panel. In multiple mode
//! the panel stays open and each commit toggles membership.
//!
//! Options that unmount leave the navigation list but stay known to the
//! selection, so a panel that unmounts on close keeps what was chosen.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spark_signals::{Signal, signal};

use super::shared::{Deferred, ElementSlot, Regions, aria_flag};
use super::types::{Cleanup, ValueCallback};
use crate::engine::{Collection, Focus, Item, PointerEvent, Runtime, Scope};
use crate::error::Result;
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{
    Disclosure, DisclosureState, Key, KeyboardEvent, OutsideClick, SelectionEvent, SelectionMode,
    SelectionState,
};

// =============================================================================
// Shared API
// =============================================================================

#[derive(Clone)]
pub struct SelectOptionData<V> {
    pub key: String,
    pub value: V,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectSlot {
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectOptionSlot {
    pub active: bool,
    pub selected: bool,
    pub disabled: bool,
}

pub struct SelectApi<V: Clone + 'static> {
    me: Weak<SelectApi<V>>,
    runtime: Runtime,
    disclosure: Disclosure,
    options: Collection<SelectOptionData<V>>,
    selection: SelectionState<V>,
    label: ElementSlot,
    button: ElementSlot,
    panel: ElementSlot,
    search_box: ElementSlot,
    regions: Regions,
    deferred: Deferred,
    outside: RefCell<Option<OutsideClick>>,
}

impl<V: Clone + 'static> SelectApi<V> {
    fn new(runtime: Runtime, mode: SelectionMode) -> Rc<Self> {
        Rc::new_cyclic(|me| {
            let options = Collection::new(&runtime);
            let disclosure = Disclosure::new();
            disclosure.link_active(options.active_signal());
            Self {
                me: me.clone(),
                deferred: Deferred::new(runtime.clone()),
                runtime,
                disclosure,
                options,
                selection: SelectionState::new(mode),
                label: ElementSlot::default(),
                button: ElementSlot::default(),
                panel: ElementSlot::default(),
                search_box: ElementSlot::default(),
                regions: Regions::default(),
                outside: RefCell::new(None),
            }
        })
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
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

    pub fn close(&self) {
        self.deferred.cancel_all();
        self.disclosure.close();
        self.options.clear_search();
    }

    pub fn go_to(&self, focus: Focus) {
        self.options.go_to(focus);
    }

    pub fn options(&self) -> &Collection<SelectOptionData<V>> {
        &self.options
    }

    pub fn selection(&self) -> &SelectionState<V> {
        &self.selection
    }

    /// Commit the option with this key.
    pub fn select(&self, key: &str) -> Result<()> {
        self.selection.select(key)
    }

    /// Replace the selection with these keys (controlled value).
    pub fn set_selected(&self, keys: &[String]) -> Result<()> {
        self.selection.set_selected(keys)
    }

    pub fn selected_values(&self) -> Vec<V> {
        self.selection.selected_values()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.is_selected(key)
    }

    fn slot(&self) -> SelectSlot {
        SelectSlot {
            open: self.is_open(),
        }
    }

    /// Commit the active option. Single mode closes and restores focus.
    fn commit_active(&self) -> Result<()> {
        let Some(item) = self.options.active_item() else {
            return Ok(());
        };
        self.commit(&item)
    }

    fn commit(&self, item: &Item<SelectOptionData<V>>) -> Result<()> {
        self.selection.select(&item.value.key)?;
        if self.mode() == SelectionMode::Single {
            self.close();
            self.deferred.focus(self.button.get());
        }
        Ok(())
    }

    /// After the panel renders: focus the search box (or the list) and
    /// place the active option.
    fn focus_panel_later(&self, fallback: Option<Focus>) {
        let me = self.me.clone();
        self.deferred.next_tick(move || {
            let Some(api) = me.upgrade() else { return };
            if !api.is_open() {
                return;
            }
            let host = api.runtime.focus_host();
            if let Some(search) = api.search_box.get() {
                host.focus(&search);
            } else if let Some(panel) = api.panel.get() {
                host.focus(&panel);
            }
            let Some(fallback) = fallback else { return };
            match api.first_selected_option_id() {
                Some(id) => api.go_to(Focus::Specific(id)),
                None => api.go_to(fallback),
            }
        });
    }

    fn first_selected_option_id(&self) -> Option<String> {
        let selected = self.selection.selected_ids();
        self.options
            .items()
            .into_iter()
            .find(|item| selected.contains(&item.value.key))
            .map(|item| item.id)
    }

    fn handle_outside_click(&self, event: &PointerEvent) {
        if !self.is_open() {
            return;
        }
        self.close();
        if !event.default_prevented {
            self.deferred.focus(self.button.get());
        }
    }

    /// Keys shared by the option list and the search box.
    fn handle_navigation_key(&self, event: &KeyboardEvent) -> Option<bool> {
        let handled = match event.key {
            Key::Enter => {
                if let Err(err) = self.commit_active() {
                    tracing::warn!(%err, "select commit failed");
                }
                true
            }
            Key::ArrowDown => {
                self.go_to(Focus::Next);
                true
            }
            Key::ArrowUp => {
                self.go_to(Focus::Previous);
                true
            }
            Key::Home | Key::PageUp => {
                self.go_to(Focus::First);
                true
            }
            Key::End | Key::PageDown => {
                self.go_to(Focus::Last);
                true
            }
            Key::Escape => {
                self.close();
                self.deferred.focus(self.button.get());
                true
            }
            Key::Tab => true,
            _ => return None,
        };
        Some(handled)
    }

    fn teardown(&self) {
        if let Some(outside) = self.outside.borrow_mut().take() {
            outside.cancel();
        }
        self.deferred.cancel_all();
        self.options.clear_search();
    }
}

// =============================================================================
// Select
// =============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct SelectProps {
    pub mode: SelectionMode,
}

pub struct Select<V: Clone + 'static> {
    api: Rc<SelectApi<V>>,
    scope: Scope,
}

impl<V: Clone + 'static> Select<V> {
    pub fn new(parent: &Scope, props: SelectProps) -> Result<Self> {
        let runtime = parent.runtime().clone();
        let api = SelectApi::new(runtime.clone(), props.mode);
        let scope = parent.child();
        scope.provide("Select", api.clone())?;

        let weak = Rc::downgrade(&api);
        let outside = OutsideClick::install(runtime.window(), api.regions.shared(), move |event| {
            if let Some(api) = weak.upgrade() {
                api.handle_outside_click(event);
            }
        });
        *api.outside.borrow_mut() = Some(outside);

        Ok(Self { api, scope })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn api(&self) -> Rc<SelectApi<V>> {
        self.api.clone()
    }

    pub fn slot(&self) -> SelectSlot {
        self.api.slot()
    }

    /// Listen for selection changes. Returns cleanup function.
    pub fn on_change(&self, handler: impl Fn(&SelectionEvent<V>) + 'static) -> Cleanup {
        self.api.selection.on_change(handler)
    }

    pub fn render(&self) -> Rendered {
        render(Features::NONE, true, RenderProps::default(), Attrs::new())
    }
}

impl<V: Clone + 'static> Drop for Select<V> {
    fn drop(&mut self) {
        self.api.teardown();
    }
}

// =============================================================================
// SelectLabel
// =============================================================================

pub struct SelectLabel<V: Clone + 'static> {
    api: Rc<SelectApi<V>>,
    id: String,
}

impl<V: Clone + 'static> SelectLabel<V> {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<SelectApi<V>>("SelectLabel", "Select")?;
        let id = scope.runtime().next_id("select-label");
        api.label.set(&id);
        Ok(Self { api, id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle_pointer_up(&self) {
        if let Some(button) = self.api.button.get() {
            self.api.runtime.focus_host().focus(&button);
        }
    }

    pub fn slot(&self) -> SelectSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        render(
            Features::NONE,
            true,
            RenderProps::default(),
            Attrs::new().with("id", &self.id),
        )
    }
}

impl<V: Clone + 'static> Drop for SelectLabel<V> {
    fn drop(&mut self) {
        self.api.label.clear(&self.id);
    }
}

// =============================================================================
// SelectButton
// =============================================================================

pub struct SelectButton<V: Clone + 'static> {
    api: Rc<SelectApi<V>>,
    id: String,
}

impl<V: Clone + 'static> SelectButton<V> {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<SelectApi<V>>("SelectButton", "Select")?;
        let id = scope.runtime().next_id("select-button");
        api.button.set(&id);
        api.regions.add(&id);
        Ok(Self { api, id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
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

    /// Returns true when the default was prevented.
    pub fn handle_pointer_up(&self) -> bool {
        if self.api.is_open() {
            self.api.close();
            self.api.deferred.focus(Some(self.id.clone()));
            return false;
        }
        self.api.open();
        self.api.focus_panel_later(None);
        true
    }

    pub fn handle_focus(&self) {
        if !self.api.is_open() {
            return;
        }
        let target = self.api.search_box.get().or_else(|| self.api.panel.get());
        if let Some(target) = target {
            self.api.runtime.focus_host().focus(&target);
        }
    }

    pub fn slot(&self) -> SelectSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let labelled_by = self
            .api
            .label
            .get()
            .map(|label| format!("{label} {}", self.id));
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("type", "button")
            .with("aria-haspopup", true)
            .with_opt("aria-controls", self.api.panel.get())
            .with_opt("aria-expanded", aria_flag(self.api.is_open()))
            .with_opt("aria-labelledby", labelled_by);
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl<V: Clone + 'static> Drop for SelectButton<V> {
    fn drop(&mut self) {
        self.api.button.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

// =============================================================================
// SelectOptions
// =============================================================================

pub struct SelectOptions<V: Clone + 'static> {
    api: Rc<SelectApi<V>>,
    id: String,
    props: RenderProps,
}

impl<V: Clone + 'static> SelectOptions<V> {
    pub fn new(scope: &Scope, props: RenderProps) -> Result<Self> {
        let api = scope.require::<SelectApi<V>>("SelectOptions", "Select")?;
        let id = scope.runtime().next_id("select-options");
        api.panel.set(&id);
        api.regions.add(&id);
        Ok(Self { api, id, props })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn active_index(&self) -> Option<usize> {
        self.api.options.active_index()
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        if let Some(handled) = self.api.handle_navigation_key(event) {
            return handled;
        }
        if event.key == Key::Space && self.api.options.query().is_empty() {
            if let Err(err) = self.api.commit_active() {
                tracing::warn!(%err, "select commit failed");
            }
            return true;
        }
        match event.printable_char() {
            Some(ch) => {
                self.api.options.search(ch);
                true
            }
            None => false,
        }
    }

    pub fn slot(&self) -> SelectSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let labelled_by = self.api.label.get().or_else(|| self.api.button.get());
        let multiple = self.api.mode() == SelectionMode::Multiple;
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "listbox")
            .with("tabindex", 0)
            .with_opt("aria-activedescendant", self.api.options.active_id())
            .with_opt("aria-labelledby", labelled_by)
            .with_opt("aria-multiselectable", aria_flag(multiple));
        render(
            Features::RENDER_STRATEGY | Features::STATIC,
            self.api.is_open(),
            self.props,
            attrs,
        )
    }
}

impl<V: Clone + 'static> Drop for SelectOptions<V> {
    fn drop(&mut self) {
        self.api.panel.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

// =============================================================================
// SelectOption
// =============================================================================

pub struct SelectOptionProps<V> {
    /// Equality key. Defaults to the generated element id.
    pub key: Option<String>,
    pub value: V,
    /// Display text, used for typeahead.
    pub text: String,
    pub disabled: bool,
}

impl<V> SelectOptionProps<V> {
    pub fn new(text: impl Into<String>, value: V) -> Self {
        Self {
            key: None,
            value,
            text: text.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

pub struct SelectOption<V: Clone + 'static> {
    api: Rc<SelectApi<V>>,
    id: String,
    key: String,
    disabled: bool,
}

impl<V: Clone + 'static> SelectOption<V> {
    pub fn new(scope: &Scope, props: SelectOptionProps<V>) -> Result<Self> {
        let api = scope.require::<SelectApi<V>>("SelectOption", "Select")?;
        let id = scope.runtime().next_id("select-option");
        let key = props.key.unwrap_or_else(|| id.clone());

        api.selection.register_option(key.clone(), props.value.clone());
        let data = SelectOptionData {
            key: key.clone(),
            value: props.value,
        };
        api.options
            .register(Item::new(id.clone(), data).text(&props.text).disabled(props.disabled));

        Ok(Self {
            api,
            id,
            key,
            disabled: props.disabled,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_active(&self) -> bool {
        self.api.options.is_active(&self.id)
    }

    pub fn is_selected(&self) -> bool {
        self.api.is_selected(&self.key)
    }

    /// Returns true when the click was prevented (disabled option).
    pub fn handle_click(&self) -> Result<bool> {
        if self.disabled {
            return Ok(true);
        }
        match self.api.options.registry().get(&self.id) {
            Some(item) => self.api.commit(&item)?,
            None => self.api.select(&self.key)?,
        }
        Ok(false)
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

    pub fn slot(&self) -> SelectOptionSlot {
        SelectOptionSlot {
            active: self.is_active(),
            selected: self.is_selected(),
            disabled: self.disabled,
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "option")
            .with("tabindex", -1)
            .with_opt("aria-disabled", aria_flag(self.disabled))
            .with_opt("aria-selected", aria_flag(self.is_selected()));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl<V: Clone + 'static> Drop for SelectOption<V> {
    fn drop(&mut self) {
        self.api.options.unregister(&self.id);
    }
}

// =============================================================================
// SelectSearchBox
// =============================================================================

/// Text input that filters or searches the options.
///
/// While mounted, opening the select focuses this box instead of the list.
/// Navigation keys typed into it drive the option list.
pub struct SelectSearchBox<V: Clone + 'static> {
    api: Rc<SelectApi<V>>,
    id: String,
    value: Signal<String>,
    on_input: Option<ValueCallback<String>>,
}

impl<V: Clone + 'static> SelectSearchBox<V> {
    pub fn new(scope: &Scope, on_input: Option<ValueCallback<String>>) -> Result<Self> {
        let api = scope.require::<SelectApi<V>>("SelectSearchBox", "Select")?;
        let id = scope.runtime().next_id("select-searchbox");
        api.search_box.set(&id);
        api.regions.add(&id);
        Ok(Self {
            api,
            id,
            value: signal(String::new()),
            on_input,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current text (reactive).
    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn handle_input(&self, text: &str) {
        let text = text.to_string();
        self.value.set(text.clone());
        if let Some(on_input) = &self.on_input {
            on_input(&text);
        }
    }

    pub fn clear(&self) {
        self.handle_input("");
    }

    pub fn handle_key_down(&self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }
        self.api.handle_navigation_key(event).unwrap_or(false)
    }

    pub fn slot(&self) -> SelectSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("tabindex", 0)
            .with("value", self.value.get());
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl<V: Clone + 'static> Drop for SelectSearchBox<V> {
    fn drop(&mut self) {
        self.api.search_box.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaxConfig;
    use crate::state::{RecordingFocusHost, Scheduler};
    use pretty_assertions::assert_eq;

    struct Fixture {
        runtime: Runtime,
        host: Rc<RecordingFocusHost>,
        select: Select<String>,
        button: SelectButton<String>,
        list: SelectOptions<String>,
        options: Vec<SelectOption<String>>,
    }

    fn setup(mode: SelectionMode, names: &[&str]) -> Fixture {
        let host = Rc::new(RecordingFocusHost::new());
        let runtime = Runtime::with_host(RaxConfig::default(), Scheduler::new(), host.clone());
        let root = Scope::root(runtime.clone());
        let select = Select::new(&root, SelectProps { mode }).unwrap();
        let button = SelectButton::new(select.scope()).unwrap();
        let list = SelectOptions::new(select.scope(), RenderProps::default()).unwrap();
        let options = names
            .iter()
            .map(|name| {
                let props = SelectOptionProps::new(*name, name.to_string()).key(name.to_lowercase());
                SelectOption::new(select.scope(), props).unwrap()
            })
            .collect();
        Fixture {
            runtime,
            host,
            select,
            button,
            list,
            options,
        }
    }

    fn key(name: &str) -> KeyboardEvent {
        KeyboardEvent::new(name)
    }

    #[test]
    fn test_single_enter_selects_and_closes() {
        let f = setup(SelectionMode::Single, &["Red", "Green", "Blue"]);
        f.button.handle_key_down(&key("ArrowDown"));
        f.runtime.scheduler().flush();
        assert_eq!(f.list.active_index(), Some(0));
        assert_eq!(f.host.focused().as_deref(), Some(f.list.id()));

        f.list.handle_key_down(&key("ArrowDown"));
        f.list.handle_key_down(&key("Enter"));
        assert_eq!(f.select.api().selected_values(), vec!["Green".to_string()]);
        assert!(!f.select.slot().open);

        f.runtime.scheduler().flush();
        assert_eq!(f.host.focused().as_deref(), Some(f.button.id()));
    }

    #[test]
    fn test_close_before_render_drops_pending_focus() {
        let f = setup(SelectionMode::Single, &["Red", "Green"]);
        f.button.handle_key_down(&key("ArrowUp"));
        f.list.handle_key_down(&key("Escape"));

        f.runtime.scheduler().flush();
        assert!(!f.select.slot().open);
        assert_eq!(f.list.active_index(), None);
        assert_eq!(f.host.focused().as_deref(), Some(f.button.id()));
    }

    #[test]
    fn test_single_replaces_previous_value() {
        let f = setup(SelectionMode::Single, &["Red", "Green"]);
        f.options[0].handle_click().unwrap();
        f.options[1].handle_click().unwrap();
        assert_eq!(f.select.api().selected_values(), vec!["Green".to_string()]);
        assert!(!f.options[0].is_selected());
    }

    #[test]
    fn test_multiple_toggles_and_stays_open() {
        let f = setup(SelectionMode::Multiple, &["Red", "Green", "Blue"]);
        f.button.handle_key_down(&key("Enter"));
        f.runtime.scheduler().flush();

        f.list.handle_key_down(&key("Enter"));
        f.list.handle_key_down(&key("ArrowDown"));
        f.list.handle_key_down(&key("Enter"));
        f.list.handle_key_down(&key("ArrowUp"));
        f.list.handle_key_down(&key("Enter"));

        assert!(f.select.slot().open);
        assert_eq!(f.select.api().selected_values(), vec!["Green".to_string()]);
    }

    #[test]
    fn test_reopen_focuses_selected_option() {
        let f = setup(SelectionMode::Single, &["Red", "Green", "Blue"]);
        f.options[2].handle_click().unwrap();

        f.button.handle_key_down(&key("ArrowDown"));
        f.runtime.scheduler().flush();
        assert_eq!(f.list.active_index(), Some(2));
    }

    #[test]
    fn test_search_box_takes_focus_and_drives_list() {
        let f = setup(SelectionMode::Single, &["Red", "Green"]);
        let search = SelectSearchBox::<String>::new(f.select.scope(), None).unwrap();

        f.button.handle_pointer_up();
        f.runtime.scheduler().flush();
        assert_eq!(f.host.focused().as_deref(), Some(search.id()));

        assert!(search.handle_key_down(&key("ArrowDown")));
        assert_eq!(f.list.active_index(), Some(0));
        // Typing goes into the box, not the list
        assert!(!search.handle_key_down(&key("g")));
        search.handle_input("g");
        assert_eq!(search.value(), "g");
    }

    #[test]
    fn test_typeahead_in_list() {
        let f = setup(SelectionMode::Single, &["Apple", "Banana", "Apricot"]);
        f.button.handle_key_down(&key("Enter"));
        f.runtime.scheduler().flush();
        f.list.handle_key_down(&key("a"));
        f.list.handle_key_down(&key("p"));
        f.list.handle_key_down(&key("r"));
        assert_eq!(f.list.active_index(), Some(2));
    }

    #[test]
    fn test_selection_survives_option_unmount() {
        let mut f = setup(SelectionMode::Single, &["Red", "Green"]);
        f.options[1].handle_click().unwrap();
        f.options.clear();
        assert_eq!(f.select.api().selected_values(), vec!["Green".to_string()]);
        assert!(f.select.api().options().items().is_empty());
    }

    #[test]
    fn test_labelled_by_label_and_button() {
        let f = setup(SelectionMode::Single, &["Red"]);
        let label = SelectLabel::<String>::new(f.select.scope()).unwrap();
        let rendered = f.button.render();
        let expected = format!("{} {}", label.id(), f.button.id());
        assert_eq!(rendered.attrs().unwrap().get("aria-labelledby"), Some(expected.as_str()));

        label.handle_pointer_up();
        assert_eq!(f.host.focused().as_deref(), Some(f.button.id()));
    }

    #[test]
    fn test_option_attrs() {
        let f = setup(SelectionMode::Multiple, &["Red", "Green"]);
        f.options[1].handle_click().unwrap();
        let rendered = f.options[1].render();
        assert_eq!(rendered.attrs().unwrap().get("aria-selected"), Some("true"));
        assert_eq!(rendered.attrs().unwrap().get("role"), Some("option"));

        f.button.handle_pointer_up();
        let list = f.list.render();
        assert_eq!(list.attrs().unwrap().get("aria-multiselectable"), Some("true"));
    }

    #[test]
    fn test_change_events() {
        let f = setup(SelectionMode::Single, &["Red", "Green"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _cleanup = f.select.on_change(move |event| {
            if let SelectionEvent::Changed { ids, .. } = event {
                seen_clone.borrow_mut().push(ids.clone());
            }
        });
        f.options[0].handle_click().unwrap();
        f.options[1].handle_click().unwrap();
        // picking the current value again still reports it
        f.options[1].handle_click().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                vec!["red".to_string()],
                vec!["green".to_string()],
                vec!["green".to_string()]
            ]
        );
        assert_eq!(f.select.api().selected_values(), vec!["Green".to_string()]);
    }

    #[test]
    fn test_outside_click_closes() {
        let f = setup(SelectionMode::Single, &["Red"]);
        f.button.handle_pointer_up();
        f.runtime.window().dispatch_click(&PointerEvent::on(f.button.id(), &[]));
        assert!(f.select.slot().open);
        f.runtime.window().dispatch_click(&PointerEvent::outside());
        assert!(!f.select.slot().open);
    }
}
