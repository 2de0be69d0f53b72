//! On-screen keyboard model.
//!
//! # Design
//!
//! The keyboard knows nothing about documents or speech.  It turns key
//! names into [`Key`]s, tracks the Shift / Caps Lock state, and resolves a
//! character key into the text it types.  [`crate::app::WriterSession`]
//! applies the result to the document.
//!
//! # Usage
//!
//! ```
//! use simple_writer::keyboard::{parse_key, Key, KeyboardState};
//!
//! let mut state = KeyboardState::default();
//! state.press(&parse_key("SHIFT").unwrap());
//!
//! assert_eq!(state.resolve('h'), 'H');
//! assert_eq!(state.resolve('i'), 'i'); // shift is released after one key
//! assert_eq!(parse_key("RETURN"), Ok(Key::Return));
//! ```

pub mod layout;

pub use layout::{category, rows, KeyCategory};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A key on the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key (letters, digits, punctuation).
    Char(char),
    Space,
    Return,
    /// Backspace: removes the selection or the character before the caret.
    Delete,
    Tab,
    /// One-shot upper case for the next letter.
    Shift,
    CapsLock,
}

impl Key {
    /// The key name used in layouts and [`parse_key`].
    pub fn name(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Space => "SPACE".into(),
            Key::Return => "RETURN".into(),
            Key::Delete => "DELETE".into(),
            Key::Tab => "TAB".into(),
            Key::Shift => "SHIFT".into(),
            Key::CapsLock => "CAPSLOCK".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyError / parse_key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key: {0:?}")]
    Unknown(String),
}

/// Parse a key name into a [`Key`].
///
/// Named keys are case-insensitive (`"Space"`, `"SPACE"`); any single
/// character is a character key.
///
/// ```
/// use simple_writer::keyboard::{parse_key, Key};
///
/// assert_eq!(parse_key("space"), Ok(Key::Space));
/// assert_eq!(parse_key("."),     Ok(Key::Char('.')));
/// assert!(parse_key("xyz").is_err());
/// ```
pub fn parse_key(name: &str) -> Result<Key, KeyError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(match c {
            ' ' => Key::Space,
            '\n' => Key::Return,
            '\t' => Key::Tab,
            c => Key::Char(c),
        });
    }

    match name.to_ascii_uppercase().as_str() {
        "SPACE" => Ok(Key::Space),
        "RETURN" | "ENTER" => Ok(Key::Return),
        "DELETE" | "BACKSPACE" => Ok(Key::Delete),
        "TAB" => Ok(Key::Tab),
        "SHIFT" => Ok(Key::Shift),
        "CAPSLOCK" | "CAPS" => Ok(Key::CapsLock),
        _ => Err(KeyError::Unknown(name.to_string())),
    }
}

// ---------------------------------------------------------------------------
// KeyboardState
// ---------------------------------------------------------------------------

/// Modifier state of the on-screen keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub shift: bool,
    pub caps_lock: bool,
}

impl KeyboardState {
    /// Update modifiers for `key`.  Returns `true` when the key was a
    /// modifier and has been fully handled.
    pub fn press(&mut self, key: &Key) -> bool {
        match key {
            Key::Shift => {
                self.shift = !self.shift;
                true
            }
            Key::CapsLock => {
                self.caps_lock = !self.caps_lock;
                true
            }
            _ => false,
        }
    }

    /// The character a character key types, releasing a one-shot shift.
    pub fn resolve(&mut self, c: char) -> char {
        let upper = self.shift || self.caps_lock;
        self.shift = false;
        if upper {
            c.to_uppercase().next().unwrap_or(c)
        } else {
            c
        }
    }

    /// Whether letter keys currently show upper case.
    pub fn is_upper(&self) -> bool {
        self.shift || self.caps_lock
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parse_key ---

    #[test]
    fn parse_named_keys() {
        assert_eq!(parse_key("SPACE"), Ok(Key::Space));
        assert_eq!(parse_key("Enter"), Ok(Key::Return));
        assert_eq!(parse_key("backspace"), Ok(Key::Delete));
        assert_eq!(parse_key("TAB"), Ok(Key::Tab));
        assert_eq!(parse_key("Shift"), Ok(Key::Shift));
        assert_eq!(parse_key("CAPSLOCK"), Ok(Key::CapsLock));
    }

    #[test]
    fn parse_single_characters() {
        assert_eq!(parse_key("a"), Ok(Key::Char('a')));
        assert_eq!(parse_key("?"), Ok(Key::Char('?')));
        assert_eq!(parse_key("é"), Ok(Key::Char('é')));
        assert_eq!(parse_key(" "), Ok(Key::Space));
    }

    #[test]
    fn parse_unknown_is_an_error() {
        assert_eq!(parse_key("F13"), Err(KeyError::Unknown("F13".into())));
        assert!(parse_key("").is_err());
    }

    #[test]
    fn names_round_trip_through_parse() {
        for key in [
            Key::Char('x'),
            Key::Space,
            Key::Return,
            Key::Delete,
            Key::Tab,
            Key::Shift,
            Key::CapsLock,
        ] {
            assert_eq!(parse_key(&key.name()), Ok(key));
        }
    }

    // ---- KeyboardState ---

    #[test]
    fn shift_is_one_shot() {
        let mut state = KeyboardState::default();
        assert!(state.press(&Key::Shift));
        assert_eq!(state.resolve('a'), 'A');
        assert_eq!(state.resolve('a'), 'a');
    }

    #[test]
    fn caps_lock_sticks() {
        let mut state = KeyboardState::default();
        state.press(&Key::CapsLock);
        assert_eq!(state.resolve('a'), 'A');
        assert_eq!(state.resolve('b'), 'B');
        state.press(&Key::CapsLock);
        assert_eq!(state.resolve('c'), 'c');
    }

    #[test]
    fn non_letters_are_unchanged_by_shift() {
        let mut state = KeyboardState::default();
        state.press(&Key::Shift);
        assert_eq!(state.resolve('.'), '.');
        assert!(!state.shift);
    }

    #[test]
    fn non_modifiers_are_not_consumed() {
        let mut state = KeyboardState::default();
        assert!(!state.press(&Key::Space));
        assert!(!state.press(&Key::Char('a')));
        assert!(!state.is_upper());
    }
}
