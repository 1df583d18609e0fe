//! Keyboard shortcuts.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::UiError;
use crate::refresh::RefreshDispatcher;
use crate::surface::Surface;

/// A key as reported by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F5,
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
        }
    }

    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }
}

/// Parses `ctrl+r`, `Ctrl+E`, `F5` or a single character.
///
/// The modifier is case-insensitive; the character keeps its case, so
/// `ctrl+R` is a different key from `ctrl+r`.
impl FromStr for KeyEvent {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("f5") {
            return Ok(Self::plain(Key::F5));
        }

        let (ctrl, rest) = match text.split_once('+') {
            Some((modifier, rest)) if modifier.eq_ignore_ascii_case("ctrl") => (true, rest),
            Some(_) => return Err(UiError::InvalidKey(s.to_string())),
            None => (false, text),
        };

        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self {
                key: Key::Char(c),
                ctrl,
            }),
            _ => Err(UiError::InvalidKey(s.to_string())),
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{c}"),
            Key::F5 => f.write_str("F5"),
        }
    }
}

/// Actions bound to the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Ctrl+r or F5.
    Refresh,
    /// Ctrl+e.
    Export,
    /// Ctrl+p.
    Print,
}

impl Shortcut {
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        match (event.key, event.ctrl) {
            (Key::F5, _) => Some(Self::Refresh),
            (Key::Char('r'), true) => Some(Self::Refresh),
            (Key::Char('e'), true) => Some(Self::Export),
            (Key::Char('p'), true) => Some(Self::Print),
            _ => None,
        }
    }
}

/// Maps key presses to dispatcher and surface actions.
#[derive(Clone)]
pub struct InputHandler {
    dispatcher: RefreshDispatcher,
    surface: Arc<dyn Surface>,
}

impl InputHandler {
    pub fn new(dispatcher: RefreshDispatcher, surface: Arc<dyn Surface>) -> Self {
        Self {
            dispatcher,
            surface,
        }
    }

    /// Handle one key press. Returns true when the key was a shortcut and
    /// its default action should be suppressed.
    pub async fn handle_key(&self, event: &KeyEvent) -> bool {
        let Some(shortcut) = Shortcut::from_key(event) else {
            return false;
        };
        debug!(key = %event, ?shortcut, "Shortcut");

        match shortcut {
            Shortcut::Refresh => {
                self.dispatcher.refresh_current_page().await;
            }
            Shortcut::Export => {
                self.dispatcher.export_current_page().await;
            }
            Shortcut::Print => self.surface.print(),
        }
        true
    }
}
