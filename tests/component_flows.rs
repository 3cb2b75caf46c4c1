//! End-to-end keyboard and pointer flows through the public API.

use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use raxui::components::{
    Menu, MenuButton, MenuButtonProps, MenuItem, MenuItemProps, MenuItems, Select, SelectButton,
    SelectOption, SelectOptionProps, SelectOptions, SelectProps,
};
use raxui::engine::{Collection, Focus, Item, PointerEvent, Runtime, Scope};
use raxui::render::RenderProps;
use raxui::state::{KeyboardEvent, RecordingFocusHost, Scheduler, SelectionMode};
use raxui::{RaxConfig, RaxError};

fn runtime() -> (Runtime, Rc<RecordingFocusHost>) {
    let host = Rc::new(RecordingFocusHost::new());
    let runtime = Runtime::with_host(RaxConfig::default(), Scheduler::new(), host.clone());
    (runtime, host)
}

fn key(name: &str) -> KeyboardEvent {
    KeyboardEvent::new(name)
}

// =============================================================================
// Collection
// =============================================================================

#[test]
fn collection_skips_disabled_and_wraps() {
    let (runtime, _host) = runtime();
    let list: Collection<()> = Collection::new(&runtime);
    list.register(Item::new("1", ()));
    list.register(Item::new("2", ()).disabled(true));
    list.register(Item::new("3", ()));

    assert_eq!(list.active_index(), None);
    assert_eq!(list.go_to(Focus::First), Some(0));
    assert_eq!(list.go_to(Focus::Next), Some(2));
    assert_eq!(list.go_to(Focus::Next), Some(0));
    assert_eq!(list.go_to(Focus::Previous), Some(2));
}

// =============================================================================
// Menu
// =============================================================================

struct MenuFixture {
    runtime: Runtime,
    host: Rc<RecordingFocusHost>,
    menu: Menu,
    button: MenuButton,
    panel: MenuItems,
    items: Vec<MenuItem>,
}

fn fruit_menu() -> MenuFixture {
    let (runtime, host) = runtime();
    let root = Scope::root(runtime.clone());
    let menu = Menu::new(&root).unwrap();
    let button = MenuButton::new(menu.scope(), MenuButtonProps::default()).unwrap();
    let panel = MenuItems::new(menu.scope(), RenderProps::default()).unwrap();
    let items = ["Apple", "Banana", "Apricot"]
        .into_iter()
        .map(|text| MenuItem::new(menu.scope(), MenuItemProps::new(text)).unwrap())
        .collect();
    MenuFixture {
        runtime,
        host,
        menu,
        button,
        panel,
        items,
    }
}

#[test]
fn menu_opens_on_arrow_down_and_focuses_panel() {
    let f = fruit_menu();
    assert!(f.button.handle_key_down(&key("ArrowDown")));
    assert!(f.menu.slot().open);

    // virtual focus lands after the panel renders
    assert_eq!(f.panel.active_index(), None);
    f.runtime.scheduler().flush();
    assert_eq!(f.panel.active_index(), Some(0));
    assert_eq!(f.host.focused().as_deref(), Some(f.panel.id()));
}

#[test]
fn menu_typeahead_first_match_wins() {
    let f = fruit_menu();
    f.button.handle_key_down(&key("ArrowUp"));
    f.runtime.scheduler().flush();
    assert_eq!(f.panel.active_index(), Some(2));

    f.panel.handle_key_down(&key("a"));
    f.panel.handle_key_down(&key("p"));
    assert_eq!(f.panel.active_index(), Some(0));

    // no match: index stays
    f.panel.handle_key_down(&key("z"));
    assert_eq!(f.panel.active_index(), Some(0));

    f.runtime.scheduler().advance(Duration::from_millis(400));
    assert_eq!(f.menu.api().items().query(), "");
}

#[test]
fn menu_escape_closes_and_returns_focus() {
    let f = fruit_menu();
    f.button.handle_key_down(&key("Enter"));
    f.runtime.scheduler().flush();
    f.panel.handle_key_down(&key("ArrowDown"));
    assert_eq!(f.panel.active_index(), Some(1));

    f.panel.handle_key_down(&key("Escape"));
    assert!(!f.menu.slot().open);
    assert_eq!(f.panel.active_index(), None);
    assert!(f.panel.render().is_omitted());

    f.runtime.scheduler().flush();
    assert_eq!(f.host.focused().as_deref(), Some(f.button.id()));
}

#[test]
fn menu_item_unmount_follows_identity() {
    let mut f = fruit_menu();
    f.button.handle_key_down(&key("ArrowUp"));
    f.runtime.scheduler().flush();
    assert!(f.items[2].is_active());

    drop(f.items.remove(1));
    assert_eq!(f.panel.active_index(), Some(1));
    assert!(f.items[1].is_active());

    drop(f.items.remove(1));
    assert_eq!(f.panel.active_index(), None);
}

#[test]
fn menu_outside_click_closes() {
    let f = fruit_menu();
    f.button.handle_pointer_up();
    f.runtime.scheduler().flush();

    let on_item = PointerEvent::on(f.items[0].id(), &[f.panel.id()]);
    f.runtime.window().dispatch_click(&on_item);
    assert!(f.menu.slot().open);

    f.runtime.window().dispatch_click(&PointerEvent::outside());
    assert!(!f.menu.slot().open);
    f.runtime.scheduler().flush();
    assert_eq!(f.host.focused().as_deref(), Some(f.button.id()));
}

#[test]
fn dropping_menu_cancels_pending_focus() {
    let f = fruit_menu();
    f.button.handle_key_down(&key("ArrowDown"));
    let runtime = f.runtime.clone();
    let host = f.host.clone();
    drop(f);

    runtime.scheduler().flush();
    assert_eq!(host.focused(), None);
    assert_eq!(runtime.window().listener_count(), 0);
}

#[test]
fn menu_parts_need_a_menu() {
    let (runtime, _host) = runtime();
    let root = Scope::root(runtime);
    let err = MenuItem::new(&root, MenuItemProps::new("Orphan")).err().unwrap();
    assert_eq!(
        err,
        RaxError::MissingContext {
            component: "MenuItem",
            parent: "Menu",
        }
    );
}

// =============================================================================
// Select
// =============================================================================

struct SelectFixture {
    runtime: Runtime,
    host: Rc<RecordingFocusHost>,
    select: Select<&'static str>,
    button: SelectButton<&'static str>,
    panel: SelectOptions<&'static str>,
    options: Vec<SelectOption<&'static str>>,
}

fn sizes(mode: SelectionMode) -> SelectFixture {
    let (runtime, host) = runtime();
    let root = Scope::root(runtime.clone());
    let select = Select::new(&root, SelectProps { mode }).unwrap();
    let button = SelectButton::new(select.scope()).unwrap();
    let panel = SelectOptions::new(select.scope(), RenderProps::default()).unwrap();
    let options = [("a", "Small"), ("b", "Medium"), ("c", "Large")]
        .into_iter()
        .map(|(key, text)| {
            SelectOption::new(select.scope(), SelectOptionProps::new(text, text).key(key)).unwrap()
        })
        .collect();
    SelectFixture {
        runtime,
        host,
        select,
        button,
        panel,
        options,
    }
}

#[test]
fn single_select_replaces_and_closes() {
    let f = sizes(SelectionMode::Single);
    f.button.handle_key_down(&key("ArrowDown"));
    f.runtime.scheduler().flush();
    f.panel.handle_key_down(&key("Enter"));
    assert_eq!(f.select.api().selected_values(), vec!["Small"]);
    assert!(!f.select.slot().open);

    f.button.handle_key_down(&key("ArrowDown"));
    f.runtime.scheduler().flush();
    // reopening starts on the selected option
    assert_eq!(f.panel.active_index(), Some(0));
    f.panel.handle_key_down(&key("ArrowDown"));
    f.panel.handle_key_down(&key(" "));

    assert_eq!(f.select.api().selected_values(), vec!["Medium"]);
    assert!(f.options[1].is_selected());
    assert!(!f.options[0].is_selected());
    f.runtime.scheduler().flush();
    assert_eq!(f.host.focused().as_deref(), Some(f.button.id()));
}

#[test]
fn multiple_select_toggles_and_stays_open() {
    let f = sizes(SelectionMode::Multiple);
    f.button.handle_pointer_up();
    f.runtime.scheduler().flush();

    f.options[0].handle_click().unwrap();
    f.options[1].handle_click().unwrap();
    f.options[0].handle_click().unwrap();

    assert_eq!(f.select.api().selected_values(), vec!["Medium"]);
    assert!(f.select.slot().open);
    let rendered = f.panel.render();
    assert_eq!(rendered.attrs().unwrap().get("aria-multiselectable"), Some("true"));
}

#[test]
fn select_rejects_unknown_keys() {
    let f = sizes(SelectionMode::Single);
    assert_eq!(
        f.select.api().select("zz"),
        Err(RaxError::InvalidOption("zz".to_string()))
    );
    assert!(f.select.api().selected_values().is_empty());
}
