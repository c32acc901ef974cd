//! Keyboard input handling
//!
//! Maps crossterm key events to [`KeyAction`]s. While the keypad has focus
//! keys are translated into DOM `key` values and go through the shared
//! keyboard map; while the flag input has focus they edit the flag text.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::Focus;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// A key for the calculator, as a DOM `key` value
    Key(String),
    /// Move focus between keypad and flag input
    ToggleFocus,
    /// Append a character to the flag input
    TypeChar(char),
    /// Delete the last flag input character
    EraseChar,
    /// Press the submit button
    Submit,
    /// Remove the submit button's disabled state
    EnableSubmit,
    /// Press the share button
    Share,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action for the given focus
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, focus: Focus) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('s') => KeyAction::Share,
                _ => KeyAction::None,
            };
        }

        match (code, focus) {
            (KeyCode::Tab, _) => KeyAction::ToggleFocus,
            (KeyCode::F(12), _) => KeyAction::EnableSubmit,
            (KeyCode::Esc, Focus::FlagInput) => KeyAction::ToggleFocus,
            (KeyCode::Enter, Focus::FlagInput) => KeyAction::Submit,
            (KeyCode::Backspace, Focus::FlagInput) => KeyAction::EraseChar,
            (KeyCode::Char(c), Focus::FlagInput) => KeyAction::TypeChar(c),
            (code, Focus::Keypad) => Self::dom_key(code).map_or(KeyAction::None, KeyAction::Key),
            _ => KeyAction::None,
        }
    }

    /// DOM `key` value for a key code
    #[must_use]
    pub fn dom_key(code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::Enter => Some("Enter".to_string()),
            KeyCode::Esc => Some("Escape".to_string()),
            KeyCode::Backspace => Some("Backspace".to_string()),
            _ => None,
        }
    }
}

/// Splits a key script into DOM `key` values.
///
/// Every character is one key; `<Enter>`, `<Esc>` and `<Backspace>` name
/// the special keys. Anything else in angle brackets is taken literally.
#[must_use]
pub fn parse_key_script(script: &str) -> Vec<String> {
    const NAMED: [(&str, &str); 3] = [
        ("<Enter>", "Enter"),
        ("<Esc>", "Escape"),
        ("<Backspace>", "Backspace"),
    ];

    let mut keys = Vec::new();
    let mut rest = script;
    'outer: while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            for (token, key) in NAMED {
                if let Some(tail) = rest.strip_prefix(token) {
                    keys.push(key.to_string());
                    rest = tail;
                    continue 'outer;
                }
            }
        }
        keys.push(ch.to_string());
        rest = &rest[ch.len_utf8()..];
    }
    keys
}
