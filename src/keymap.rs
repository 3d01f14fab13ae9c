//! Translation of terminal key events into engine keys.
//!
//! The engine speaks single characters. Backspace and Delete become the
//! erase key, Enter becomes `=`, and Escape (or Ctrl-C) ends the session
//! without ever reaching the engine.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Character the engine interprets as backspace.
pub const ERASE_KEY: char = 'e';

/// Character the engine interprets as "calculate".
pub const CALCULATE_KEY: char = '=';

/// What the adapter should do with a key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed this character to the engine.
    Input(char),
    /// Leave the input loop.
    Quit,
    /// Nothing to do (releases, arrows, function keys, ...).
    Ignore,
}

pub fn map_key(event: &KeyEvent) -> KeyAction {
    if event.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    match event.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Backspace | KeyCode::Delete => KeyAction::Input(ERASE_KEY),
        KeyCode::Enter => KeyAction::Input(CALCULATE_KEY),
        KeyCode::Char(c) => KeyAction::Input(c),
        _ => KeyAction::Ignore,
    }
}
