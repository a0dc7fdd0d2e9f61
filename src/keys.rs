// ABOUTME: Keyboard shortcut dispatch for the lazy-slides application
// ABOUTME: Maps host key identities to presentation commands

use std::fmt;

/// A key as reported by the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Space,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Char(char),
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value. Letters are case-folded.
    pub fn from_dom(name: &str) -> Self {
        match name {
            " " | "Spacebar" | "Space" => Key::Space,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }

    /// Whether a focused text editor handles this key itself.
    pub fn consumed_by_editor(&self) -> bool {
        !matches!(self, Key::Escape | Key::Other(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => write!(f, "spacebar"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Escape => write!(f, "escape"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    ToggleMode,
    ToggleHelp,
    CycleTheme,
    ToggleExpose,
}

impl Command {
    pub fn description(self) -> &'static str {
        match self {
            Command::Next => "next slide",
            Command::Previous => "previous slide",
            Command::ToggleMode => "show/hide editor",
            Command::ToggleHelp => "show/hide keyboard shortcuts help",
            Command::CycleTheme => "cycle through themes",
            Command::ToggleExpose => "toggle between expose/presentation mode",
        }
    }
}

/// Pure lookup, no debouncing: each key-down yields at most one command.
pub fn dispatch(key: &Key) -> Option<Command> {
    match key {
        Key::Space => Some(Command::ToggleMode),
        Key::Right | Key::Down => Some(Command::Next),
        Key::Left | Key::Up => Some(Command::Previous),
        Key::Char('h') => Some(Command::ToggleHelp),
        Key::Char('t') => Some(Command::CycleTheme),
        Key::Char('p') => Some(Command::ToggleExpose),
        _ => None,
    }
}

/// Shortcut table shown in the help overlay and by `lazy-slides keys`.
pub const SHORTCUTS: &[(&str, Command)] = &[
    ("spacebar", Command::ToggleMode),
    ("right / down", Command::Next),
    ("left / up", Command::Previous),
    ("h", Command::ToggleHelp),
    ("t", Command::CycleTheme),
    ("p", Command::ToggleExpose),
];
