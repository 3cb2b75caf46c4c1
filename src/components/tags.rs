//! Tags - A tag picker: a filter box, the chosen tags, and a menu of options.
//!
//! ```text
//! Tags
//! ├─ TagsControl             click opens + focuses the filter
//! │  ├─ TagSelectionList
//! │  │  └─ TagSelectOption   click removes (opens first when closed)
//! │  │     └─ TagRemoveIcon
//! │  ├─ TagFilter            typing filters, arrows highlight, Enter picks
//! │  └─ TagsControlArrow     toggles the menu
//! └─ TagMenu
//!    ├─ TagMenuOption        hidden while filtered out
//!    └─ TagCreate            visible while the filter has text
//! ```
//!
//! The option list is fixed when the root mounts. Picking an already chosen
//! tag removes it, in both modes. [`TagCreate`] is the one path allowed to
//! select an id that is not in the option list.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use super::shared::{Deferred, ElementSlot, Emitter, Regions, aria_flag};
use super::types::{Cleanup, PropValue};
use crate::engine::{Focus, PointerEvent, Runtime, Scope, resolve_active_index};
use crate::error::{RaxError, Result};
use crate::render::{Attrs, Features, RenderProps, Rendered, render};
use crate::state::{Disclosure, Key, KeyboardEvent, OutsideClick, SelectionMode, SelectionState};

// =============================================================================
// Types
// =============================================================================

/// One pickable tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagOption {
    pub id: String,
    pub label: String,
    pub disabled: bool,
}

impl TagOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Case-insensitive substring match on the label. Blank queries match.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.label.to_lowercase().contains(&query)
    }
}

/// Notifications from a tag picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagsEvent {
    MenuOpened,
    MenuClosed,
    OptionSelected {
        id: String,
        option: TagOption,
        selected: Vec<String>,
    },
    OptionDeselected {
        id: String,
        option: TagOption,
        selected: Vec<String>,
    },
    FilterQueryChanged(String),
    /// The create entry was used; carries the tag it describes.
    CreateNewTagClicked(TagOption),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagsSlot {
    pub open: bool,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagSelectOptionSlot {
    pub selected: bool,
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagMenuOptionSlot {
    pub visible: bool,
    pub highlighted: bool,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagCreateSlot {
    pub visible: bool,
    pub highlighted: bool,
}

// =============================================================================
// Shared API
// =============================================================================

pub struct TagsApi {
    disabled: bool,
    remove_selected_on_backspace: bool,
    options: Vec<TagOption>,
    disclosure: Disclosure,
    filter_query: Signal<String>,
    highlighted: Signal<Option<String>>,
    selection: SelectionState<TagOption>,
    /// Option id -> element id of its mounted menu entry.
    option_elements: RefCell<HashMap<String, String>>,
    control: ElementSlot,
    filter: ElementSlot,
    menu: ElementSlot,
    create: ElementSlot,
    create_props: RefCell<TagCreateProps>,
    regions: Regions,
    deferred: Deferred,
    outside: RefCell<Option<OutsideClick>>,
    events: Emitter<TagsEvent>,
}

impl TagsApi {
    fn new(runtime: Runtime, props: TagsProps) -> Rc<Self> {
        let selection = SelectionState::new(props.mode);
        for option in &props.options {
            selection.register_option(option.id.clone(), option.clone());
        }
        Rc::new(Self {
            disabled: props.disabled,
            remove_selected_on_backspace: props.remove_selected_on_backspace,
            options: props.options,
            disclosure: Disclosure::new(),
            filter_query: signal(String::new()),
            highlighted: signal(None),
            selection,
            option_elements: RefCell::new(HashMap::new()),
            control: ElementSlot::default(),
            filter: ElementSlot::default(),
            menu: ElementSlot::default(),
            create: ElementSlot::default(),
            create_props: RefCell::new(TagCreateProps::default()),
            regions: Regions::default(),
            deferred: Deferred::new(runtime),
            outside: RefCell::new(None),
            events: Emitter::default(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn options(&self) -> &[TagOption] {
        &self.options
    }

    pub fn filter_query(&self) -> String {
        self.filter_query.get()
    }

    /// Options whose label matches the filter, in option order.
    pub fn filtered_options(&self) -> Vec<TagOption> {
        let query = self.filter_query.get();
        self.options
            .iter()
            .filter(|option| option.matches(&query))
            .cloned()
            .collect()
    }

    pub fn highlighted(&self) -> Option<String> {
        self.highlighted.get()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.selected_ids()
    }

    pub fn selected_options(&self) -> Vec<TagOption> {
        self.selection.selected_values()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    // =========================================================================
    // Disclosure
    // =========================================================================

    pub fn open(&self) {
        if self.disclosure.open() {
            self.events.emit(&TagsEvent::MenuOpened);
        }
    }

    /// Close the menu and drop the highlight.
    pub fn close(&self) {
        self.deferred.cancel_all();
        self.set_highlighted(None);
        if self.disclosure.close() {
            self.events.emit(&TagsEvent::MenuClosed);
        }
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    fn focus_filter_later(&self) {
        self.deferred.focus(self.filter.get());
    }

    // =========================================================================
    // Filter & Highlight
    // =========================================================================

    pub fn set_filter_query(&self, query: &str) {
        if self.filter_query.get() == query {
            return;
        }
        tracing::trace!(query, "tag filter changed");
        self.filter_query.set(query.to_string());
        self.events.emit(&TagsEvent::FilterQueryChanged(query.to_string()));
    }

    pub fn clear_filter_query(&self) {
        self.set_filter_query("");
    }

    fn set_highlighted(&self, id: Option<String>) {
        if self.highlighted.get() != id {
            self.highlighted.set(id);
        }
    }

    /// Move the highlight over the filtered, enabled options.
    ///
    /// Next and Previous wrap. With nothing left to highlight the
    /// highlight is cleared.
    pub fn highlight(&self, focus: Focus) {
        let filtered = self.filtered_options();
        let highlighted = self.highlighted.get();
        let current = highlighted
            .as_deref()
            .and_then(|id| filtered.iter().position(|option| option.id == id));
        let next = resolve_active_index(
            &focus,
            &filtered,
            current,
            |option| option.id.as_str(),
            |option| option.disabled,
        );
        self.set_highlighted(next.map(|index| filtered[index].id.clone()));
    }

    fn is_create_highlighted(&self) -> bool {
        let create = self.create.get();
        create.is_some() && self.highlighted.get() == create
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Pick `id`, or drop it when already picked. Returns whether it is
    /// selected afterwards. Disabled pickers and options are left alone.
    pub fn select(&self, id: &str) -> Result<bool> {
        let option = self.selection.option(id).ok_or_else(|| {
            tracing::warn!(id, "tag is not a known option");
            RaxError::InvalidOption(id.to_string())
        })?;
        if self.disabled || option.disabled {
            return Ok(self.is_selected(id));
        }

        let selected = self.selection.toggle(id)?;
        let ids = self.selected_ids();
        let event = if selected {
            TagsEvent::OptionSelected {
                id: id.to_string(),
                option,
                selected: ids,
            }
        } else {
            TagsEvent::OptionDeselected {
                id: id.to_string(),
                option,
                selected: ids,
            }
        };
        self.events.emit(&event);
        Ok(selected)
    }

    /// Drop the most recently picked tag. Returns its id, or `None` when
    /// nothing was removed.
    pub fn remove_last_selected(&self) -> Result<Option<String>> {
        let Some(last) = self.selected_ids().pop() else {
            return Ok(None);
        };
        if self.select(&last)? {
            return Ok(None);
        }
        Ok(Some(last))
    }

    /// Use the create entry: pick the tag it describes and clear the filter.
    ///
    /// The tag comes from the mounted [`TagCreate`]'s props, falling back to
    /// the trimmed filter text as both id and label. An id that already
    /// names an option picks that option. With `select_on_click` off only
    /// [`TagsEvent::CreateNewTagClicked`] is emitted. Returns the tag's id.
    pub fn create_from_query(&self) -> Result<Option<String>> {
        let query = self.filter_query.get().trim().to_string();
        if self.disabled || query.is_empty() {
            return Ok(None);
        }
        let (option, select_on_click) = {
            let props = self.create_props.borrow();
            (props.option_for(&query), props.select_on_click)
        };
        let id = option.id.clone();
        self.events.emit(&TagsEvent::CreateNewTagClicked(option.clone()));

        if select_on_click {
            if self.selection.has_option(&id) {
                if !self.is_selected(&id) {
                    self.select(&id)?;
                }
            } else {
                self.selection.select_new(id.clone(), option.clone())?;
                self.events.emit(&TagsEvent::OptionSelected {
                    id: id.clone(),
                    option,
                    selected: self.selected_ids(),
                });
            }
        }
        self.clear_filter_query();
        Ok(Some(id))
    }

    /// Enter in the filter: pick the highlighted entry.
    fn commit_highlighted(&self) -> Result<()> {
        if self.is_create_highlighted() {
            self.create_from_query()?;
            return Ok(());
        }
        if let Some(id) = self.highlighted.get() {
            self.select(&id)?;
        }
        Ok(())
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Click anywhere on the control: open and move focus to the filter.
    fn handle_control_click(&self) -> bool {
        if self.disabled {
            return true;
        }
        self.open();
        self.focus_filter_later();
        true
    }

    fn handle_outside_click(&self, _event: &PointerEvent) {
        if self.is_open() {
            self.close();
        }
    }

    fn teardown(&self) {
        if let Some(outside) = self.outside.borrow_mut().take() {
            outside.cancel();
        }
        self.deferred.cancel_all();
    }

    fn slot(&self) -> TagsSlot {
        TagsSlot {
            open: self.is_open(),
            disabled: self.disabled,
        }
    }
}

// =============================================================================
// Tags
// =============================================================================

#[derive(Clone, Debug)]
pub struct TagsProps {
    pub options: Vec<TagOption>,
    pub mode: SelectionMode,
    pub disabled: bool,
    /// Backspace in an empty filter removes the last tag.
    pub remove_selected_on_backspace: bool,
}

impl TagsProps {
    pub fn new(options: Vec<TagOption>) -> Self {
        Self {
            options,
            mode: SelectionMode::Single,
            disabled: false,
            remove_selected_on_backspace: true,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn remove_selected_on_backspace(mut self, enabled: bool) -> Self {
        self.remove_selected_on_backspace = enabled;
        self
    }
}

pub struct Tags {
    api: Rc<TagsApi>,
    scope: Scope,
}

impl Tags {
    pub fn new(parent: &Scope, props: TagsProps) -> Result<Self> {
        let runtime = parent.runtime().clone();
        let api = TagsApi::new(runtime.clone(), props);
        let scope = parent.child();
        scope.provide("Tags", api.clone())?;

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

    pub fn api(&self) -> Rc<TagsApi> {
        self.api.clone()
    }

    pub fn on_event(&self, handler: impl Fn(&TagsEvent) + 'static) -> Cleanup {
        self.api.events.subscribe(handler)
    }

    /// Replace the picked tags (controlled value). No events are emitted.
    pub fn set_selected(&self, ids: &[String]) -> Result<()> {
        self.api.selection.set_selected(ids)
    }

    pub fn slot(&self) -> TagsSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        render(Features::NONE, true, RenderProps::default(), Attrs::new())
    }
}

impl Drop for Tags {
    fn drop(&mut self) {
        self.api.teardown();
    }
}

// =============================================================================
// TagsControl
// =============================================================================

pub struct TagsControl {
    api: Rc<TagsApi>,
    id: String,
}

impl TagsControl {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagsControl", "Tags")?;
        let id = scope.runtime().next_id("tags-control");
        api.control.set(&id);
        api.regions.add(&id);
        Ok(Self { api, id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true: the click never reaches the page.
    pub fn handle_click(&self) -> bool {
        self.api.handle_control_click()
    }

    pub fn slot(&self) -> TagsSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with_opt("aria-disabled", aria_flag(self.api.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for TagsControl {
    fn drop(&mut self) {
        self.api.control.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

// =============================================================================
// TagsControlArrow
// =============================================================================

pub struct TagsControlArrow {
    api: Rc<TagsApi>,
    id: String,
}

impl TagsControlArrow {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagsControlArrow", "Tags")?;
        Ok(Self {
            id: scope.runtime().next_id("tags-control-arrow"),
            api,
        })
    }

    pub fn handle_click(&self) -> bool {
        if self.api.disabled {
            return true;
        }
        self.api.focus_filter_later();
        self.api.toggle();
        true
    }

    pub fn slot(&self) -> TagsSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("aria-hidden", "true");
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// TagSelectionList
// =============================================================================

pub struct TagSelectionList {
    api: Rc<TagsApi>,
    id: String,
}

impl TagSelectionList {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagSelectionList", "Tags")?;
        Ok(Self {
            id: scope.runtime().next_id("tag-selection-list"),
            api,
        })
    }

    /// Picked tags in pick order.
    pub fn selected(&self) -> Vec<TagOption> {
        self.api.selected_options()
    }

    pub fn slot(&self) -> TagsSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new().with("id", &self.id);
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// TagSelectOption
// =============================================================================

/// Handle a picked tag provides to its remove icon.
pub struct TagSelectOptionApi {
    tags: Rc<TagsApi>,
    option_id: String,
}

impl TagSelectOptionApi {
    pub fn option_id(&self) -> &str {
        &self.option_id
    }

    /// Remove the tag. A closed picker opens instead.
    pub fn remove_option(&self) -> Result<()> {
        if !self.tags.is_open() {
            self.tags.open();
            return Ok(());
        }
        if self.tags.is_selected(&self.option_id) {
            self.tags.select(&self.option_id)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct TagSelectOptionProps {
    pub option_id: String,
    pub remove_on_click: bool,
}

impl TagSelectOptionProps {
    pub fn new(option_id: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            remove_on_click: true,
        }
    }

    #[must_use]
    pub fn remove_on_click(mut self, remove: bool) -> Self {
        self.remove_on_click = remove;
        self
    }
}

pub struct TagSelectOption {
    api: Rc<TagSelectOptionApi>,
    scope: Scope,
    id: String,
    remove_on_click: bool,
}

impl TagSelectOption {
    pub fn new(scope: &Scope, props: TagSelectOptionProps) -> Result<Self> {
        let tags = scope.require::<TagsApi>("TagSelectOption", "Tags")?;
        let api = Rc::new(TagSelectOptionApi {
            tags,
            option_id: props.option_id,
        });
        let child = scope.child();
        child.provide("TagSelectOption", api.clone())?;
        Ok(Self {
            api,
            scope: child,
            id: scope.runtime().next_id("tag-select-option"),
            remove_on_click: props.remove_on_click,
        })
    }

    /// Scope for the tag's remove icon.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn handle_click(&self) -> Result<()> {
        if self.remove_on_click {
            self.api.remove_option()?;
        }
        Ok(())
    }

    pub fn slot(&self) -> TagSelectOptionSlot {
        TagSelectOptionSlot {
            selected: self.api.tags.is_selected(&self.api.option_id),
            open: self.api.tags.is_open(),
        }
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("data-id", &self.api.option_id);
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// TagRemoveIcon
// =============================================================================

pub struct TagRemoveIcon {
    api: Rc<TagSelectOptionApi>,
    id: String,
}

impl TagRemoveIcon {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<TagSelectOptionApi>("TagRemoveIcon", "TagSelectOption")?;
        Ok(Self {
            id: scope.runtime().next_id("tag-remove-icon"),
            api,
        })
    }

    pub fn handle_click(&self) -> Result<()> {
        self.api.remove_option()
    }

    pub fn render(&self) -> Rendered {
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("aria-hidden", "true");
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

// =============================================================================
// TagFilter
// =============================================================================

pub struct TagFilter {
    api: Rc<TagsApi>,
    id: String,
}

impl TagFilter {
    pub fn new(scope: &Scope) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagFilter", "Tags")?;
        let id = scope.runtime().next_id("tag-filter");
        api.filter.set(&id);
        Ok(Self { api, id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> String {
        self.api.filter_query()
    }

    /// New text in the box: refilter and highlight the first match.
    pub fn handle_input(&self, value: &str) {
        if self.api.disabled {
            return;
        }
        self.api.set_filter_query(value);
        self.api.highlight(Focus::First);
    }

    pub fn handle_focus(&self) {
        if self.api.disabled {
            return;
        }
        self.api.open();
        self.api.highlight(Focus::First);
    }

    /// Returns true when the click must stop here (tags are picked), so the
    /// control does not swallow the text selection.
    pub fn handle_click(&self) -> bool {
        !self.api.selection.is_empty()
    }

    /// Returns whether the default action was prevented.
    pub fn handle_key_down(&self, event: &KeyboardEvent) -> Result<bool> {
        if self.api.disabled || !event.is_press() || event.modifiers.any() {
            return Ok(false);
        }

        let open = self.api.is_open();
        if !open && matches!(event.key, Key::Enter | Key::ArrowUp | Key::ArrowDown | Key::Space) {
            self.api.open();
            return Ok(true);
        }

        match event.key {
            Key::Backspace => {
                if self.api.remove_selected_on_backspace && self.api.filter_query().is_empty() {
                    self.api.remove_last_selected()?;
                }
                Ok(false)
            }
            Key::Delete => {
                self.api.remove_last_selected()?;
                Ok(false)
            }
            Key::Enter => {
                self.api.commit_highlighted()?;
                Ok(true)
            }
            Key::Escape => {
                self.api.close();
                Ok(true)
            }
            Key::Home | Key::PageUp => {
                self.api.highlight(Focus::First);
                Ok(true)
            }
            Key::End | Key::PageDown => {
                self.api.highlight(Focus::Last);
                Ok(true)
            }
            Key::ArrowUp => {
                self.api.highlight(Focus::Previous);
                Ok(true)
            }
            Key::ArrowDown => {
                self.api.highlight(Focus::Next);
                Ok(true)
            }
            Key::Tab => Ok(open),
            _ => {
                self.api.open();
                Ok(false)
            }
        }
    }

    pub fn render(&self) -> Rendered {
        let active = self
            .api
            .highlighted()
            .and_then(|id| self.api.option_elements.borrow().get(&id).cloned());
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("type", "text")
            .with("role", "combobox")
            .with("autocomplete", "off")
            .with("tabindex", 0)
            .with("value", self.api.filter_query())
            .with("aria-expanded", self.api.is_open())
            .with_opt("aria-controls", self.api.menu.get())
            .with_opt("aria-activedescendant", active)
            .with_opt("disabled", aria_flag(self.api.disabled));
        render(Features::NONE, true, RenderProps::default(), attrs)
    }
}

impl Drop for TagFilter {
    fn drop(&mut self) {
        self.api.filter.clear(&self.id);
    }
}

// =============================================================================
// TagMenu
// =============================================================================

pub struct TagMenu {
    api: Rc<TagsApi>,
    id: String,
    props: RenderProps,
}

impl TagMenu {
    pub fn new(scope: &Scope, props: RenderProps) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagMenu", "Tags")?;
        let id = scope.runtime().next_id("tag-menu");
        api.menu.set(&id);
        api.regions.add(&id);
        Ok(Self { api, id, props })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn slot(&self) -> TagsSlot {
        self.api.slot()
    }

    pub fn render(&self) -> Rendered {
        let multiple = self.api.mode() == SelectionMode::Multiple;
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "listbox")
            .with_opt("aria-multiselectable", aria_flag(multiple));
        render(
            Features::RENDER_STRATEGY | Features::STATIC,
            self.api.is_open(),
            self.props,
            attrs,
        )
    }
}

impl Drop for TagMenu {
    fn drop(&mut self) {
        self.api.menu.clear(&self.id);
        self.api.regions.remove(&self.id);
    }
}

// =============================================================================
// TagMenuOption
// =============================================================================

#[derive(Clone, Debug)]
pub struct TagMenuOptionProps {
    pub option_id: String,
    pub disabled: bool,
}

impl TagMenuOptionProps {
    pub fn new(option_id: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

pub struct TagMenuOption {
    api: Rc<TagsApi>,
    id: String,
    option_id: String,
    disabled: bool,
}

impl TagMenuOption {
    pub fn new(scope: &Scope, props: TagMenuOptionProps) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagMenuOption", "Tags")?;
        let id = scope.runtime().next_id("tag-menu-option");
        let option_disabled = api
            .selection
            .option(&props.option_id)
            .is_some_and(|option| option.disabled);
        api.option_elements
            .borrow_mut()
            .insert(props.option_id.clone(), id.clone());
        Ok(Self {
            api,
            id,
            disabled: props.disabled || option_disabled,
            option_id: props.option_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true when the click was prevented (disabled option).
    pub fn handle_click(&self) -> Result<bool> {
        if self.disabled {
            return Ok(true);
        }
        self.api.select(&self.option_id)?;
        Ok(false)
    }

    pub fn handle_mouse_over(&self) {
        if !self.disabled {
            self.api.set_highlighted(Some(self.option_id.clone()));
        }
    }

    pub fn slot(&self) -> TagMenuOptionSlot {
        let query = self.api.filter_query();
        let visible = self
            .api
            .options
            .iter()
            .any(|option| option.id == self.option_id && option.matches(&query));
        TagMenuOptionSlot {
            visible,
            highlighted: self.api.highlighted().as_deref() == Some(self.option_id.as_str()),
            selected: self.api.is_selected(&self.option_id),
        }
    }

    pub fn render(&self) -> Rendered {
        let slot = self.slot();
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "option")
            .with("tabindex", -1)
            .with("data-id", &self.option_id)
            .with_opt("aria-disabled", aria_flag(self.disabled))
            .with_opt("aria-selected", aria_flag(slot.selected));
        render(Features::RENDER_STRATEGY, slot.visible, RenderProps::default(), attrs)
    }
}

impl Drop for TagMenuOption {
    fn drop(&mut self) {
        let mut elements = self.api.option_elements.borrow_mut();
        if elements.get(&self.option_id) == Some(&self.id) {
            elements.remove(&self.option_id);
        }
    }
}

// =============================================================================
// TagCreate
// =============================================================================

#[derive(Clone)]
pub struct TagCreateProps {
    /// The tag to create. `None` uses the trimmed filter text.
    pub option: Option<PropValue<TagOption>>,
    /// Pick the new tag on use. Off, the entry only reports the click.
    pub select_on_click: bool,
}

impl Default for TagCreateProps {
    fn default() -> Self {
        Self {
            option: None,
            select_on_click: true,
        }
    }
}

impl TagCreateProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the new tag, usually with a getter over the filter text.
    #[must_use]
    pub fn option(mut self, option: impl Into<PropValue<TagOption>>) -> Self {
        self.option = Some(option.into());
        self
    }

    #[must_use]
    pub fn select_on_click(mut self, select_on_click: bool) -> Self {
        self.select_on_click = select_on_click;
        self
    }

    fn option_for(&self, query: &str) -> TagOption {
        match &self.option {
            Some(option) => option.get(),
            None => TagOption::new(query, query),
        }
    }
}

pub struct TagCreate {
    api: Rc<TagsApi>,
    id: String,
}

impl TagCreate {
    pub fn new(scope: &Scope, props: TagCreateProps) -> Result<Self> {
        let api = scope.require::<TagsApi>("TagCreate", "Tags")?;
        let id = scope.runtime().next_id("tag-create");
        api.create.set(&id);
        *api.create_props.borrow_mut() = props;
        Ok(Self { api, id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Create a tag from the filter text. Returns the new tag's id.
    pub fn handle_click(&self) -> Result<Option<String>> {
        self.api.create_from_query()
    }

    pub fn handle_mouse_over(&self) {
        self.api.set_highlighted(Some(self.id.clone()));
    }

    pub fn slot(&self) -> TagCreateSlot {
        TagCreateSlot {
            visible: !self.api.filter_query().trim().is_empty(),
            highlighted: self.api.is_create_highlighted(),
        }
    }

    pub fn render(&self) -> Rendered {
        let slot = self.slot();
        let attrs = Attrs::new()
            .with("id", &self.id)
            .with("role", "option")
            .with("tabindex", -1);
        render(Features::RENDER_STRATEGY, slot.visible, RenderProps::default(), attrs)
    }
}

impl Drop for TagCreate {
    fn drop(&mut self) {
        if self.api.create.get().as_deref() == Some(self.id.as_str()) {
            *self.api.create_props.borrow_mut() = TagCreateProps::default();
        }
        self.api.create.clear(&self.id);
        if self.api.highlighted().as_deref() == Some(self.id.as_str()) {
            self.api.set_highlighted(None);
        }
    }
}
