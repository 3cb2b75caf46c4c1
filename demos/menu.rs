//! Menu Example - A keyboard-driven menu in the terminal
//!
//! This example demonstrates:
//! - Mounting a Menu with a button, a panel and items
//! - Driving it with crossterm key events
//! - Typeahead (type a letter while the menu is open)
//! - Logging through tracing (set RUST_LOG=raxui=debug, logs go to stderr)
//!
//! Run with: cargo run --example menu 2>menu.log

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{cursor, execute, terminal};
use raxui::components::{Menu, MenuButton, MenuButtonProps, MenuItem, MenuItemProps, MenuItems};
use raxui::engine::{Runtime, Scope};
use raxui::render::RenderProps;
use raxui::state::input::{InputEvent, poll_event};
use raxui::state::{Key, KeyboardEvent, Modifiers};
use raxui::RaxConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LABELS: [&str; 6] = ["New file", "Open...", "Save", "Save as...", "Export", "Quit"];

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raxui=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let runtime = Runtime::new(RaxConfig::from_env());
    let root = Scope::root(runtime.clone());

    let status = Rc::new(RefCell::new(String::from("Press Enter to open the menu, q to quit")));

    let menu = Menu::new(&root).map_err(io::Error::other)?;
    let button = MenuButton::new(menu.scope(), MenuButtonProps::default()).map_err(io::Error::other)?;
    let panel = MenuItems::new(menu.scope(), RenderProps::default()).map_err(io::Error::other)?;
    let mut items = Vec::new();
    for label in LABELS {
        let status = status.clone();
        let props = MenuItemProps::new(label)
            .disabled(label == "Export")
            .on_click(move || *status.borrow_mut() = format!("Picked: {label}"));
        items.push(MenuItem::new(menu.scope(), props).map_err(io::Error::other)?);
    }

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = (|| -> io::Result<()> {
        loop {
            runtime.scheduler().advance_to(Instant::now());
            draw(&mut stdout, &menu, &items, &status.borrow())?;

            let Some(InputEvent::Key(event)) = poll_event(Duration::from_millis(50))? else {
                continue;
            };
            if is_exit(&event) {
                return Ok(());
            }
            if menu.slot().open {
                panel.handle_key_down(&event);
            } else if event.key == Key::Char('q') {
                return Ok(());
            } else {
                button.handle_key_down(&event);
            }
            if status.borrow().ends_with("Quit") {
                return Ok(());
            }
        }
    })();

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn is_exit(event: &KeyboardEvent) -> bool {
    event.modifiers == Modifiers::ctrl() && event.key == Key::Char('c')
}

fn draw(out: &mut impl Write, menu: &Menu, items: &[MenuItem], status: &str) -> io::Result<()> {
    execute!(out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    write!(out, "[ File ]\r\n")?;
    if menu.slot().open {
        for (item, label) in items.iter().zip(LABELS) {
            let slot = item.slot();
            let marker = if slot.active { '>' } else { ' ' };
            let suffix = if slot.disabled { " (disabled)" } else { "" };
            write!(out, " {marker} {label}{suffix}\r\n")?;
        }
        write!(out, "\r\n{}\r\n", menu_query(menu))?;
    }
    write!(out, "\r\n{status}\r\n")?;
    out.flush()
}

fn menu_query(menu: &Menu) -> String {
    let query = menu.api().items().query();
    if query.is_empty() {
        String::from("type to search")
    } else {
        format!("search: {query}")
    }
}
