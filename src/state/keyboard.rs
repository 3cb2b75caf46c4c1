//! Keyboard Module - Key names and keyboard event types
//!
//! Components receive a [`KeyboardEvent`] in their `handle_key_down` methods
//! and return `true` when they prevented the default action.
//!
//! Key names follow the UI Events `key` attribute values
//! (`"Enter"`, `"ArrowUp"`, `" "` for Space, ...).
//!
//! # Example
//!
//! ```
//! use raxui::state::{Key, KeyboardEvent};
//!
//! let event = KeyboardEvent::new("ArrowDown");
//! assert_eq!(event.key, Key::ArrowDown);
//! assert!(!event.is_printable());
//!
//! let event = KeyboardEvent::new("a");
//! assert_eq!(event.printable_char(), Some('a'));
//! ```

use std::fmt;

// =============================================================================
// KEYS
// =============================================================================

/// Named keys the components react to, plus single characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowRight,
    ArrowLeft,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    /// Any other single character.
    Char(char),
    /// A key with no meaning to the components (F-keys, Insert, ...).
    Other,
}

impl Key {
    /// Parse a UI Events key name.
    pub fn parse(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Tab" => Key::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }

    /// The character this key types, if any. Space types `' '`.
    pub fn as_char(self) -> Option<char> {
        match self {
            Key::Space => Some(' '),
            Key::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Space => " ",
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowLeft => "ArrowLeft",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Tab => "Tab",
            Key::Char(c) => return write!(f, "{c}"),
            Key::Other => "Unidentified",
        };
        f.write_str(name)
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    /// Any modifier held at all.
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event from a key name
    pub fn new(key: &str) -> Self {
        Self::from_key(Key::parse(key))
    }

    /// Create a key press event from a parsed key
    pub fn from_key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: &str, modifiers: Modifiers) -> Self {
        Self {
            key: Key::parse(key),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press (or auto-repeat) event
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }

    /// A single printable character typed without ctrl/alt/meta.
    pub fn is_printable(&self) -> bool {
        self.printable_char().is_some()
    }

    /// The typed character, if this event is printable.
    pub fn printable_char(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.alt || self.modifiers.meta {
            return None;
        }
        self.key.as_char().filter(|c| !c.is_control())
    }
}

// =============================================================================
// TESTS
// =============================================================================
