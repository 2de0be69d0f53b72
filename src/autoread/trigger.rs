//! Trigger kinds and the keys that cause them.

use crate::keyboard::Key;
use crate::text::{is_terminator, LINE_BREAK};

/// What just happened in the document that may warrant speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// The space bar was pressed: a word may have just ended.
    Space,
    /// `.`, `!` or `?` was typed: a sentence has just ended.
    Period,
    /// Enter was pressed: a line has just ended.
    Return,
}

impl TriggerKind {
    /// The trigger a key press causes, if any.
    ///
    /// ```
    /// use simple_writer::autoread::TriggerKind;
    /// use simple_writer::keyboard::Key;
    ///
    /// assert_eq!(TriggerKind::for_key(&Key::Space), Some(TriggerKind::Space));
    /// assert_eq!(TriggerKind::for_key(&Key::Char('?')), Some(TriggerKind::Period));
    /// assert_eq!(TriggerKind::for_key(&Key::Char('a')), None);
    /// ```
    pub fn for_key(key: &Key) -> Option<Self> {
        match key {
            Key::Space => Some(Self::Space),
            Key::Return => Some(Self::Return),
            Key::Char(c) => Self::for_char(*c),
            _ => None,
        }
    }

    /// The trigger typing `c` causes, if any.
    pub fn for_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Space),
            LINE_BREAK => Some(Self::Return),
            c if is_terminator(c) => Some(Self::Period),
            _ => None,
        }
    }

    /// `RETURN` must wait until the new paragraph is committed.
    pub fn is_deferred(self) -> bool {
        self == Self::Return
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Space => "SPACE",
            Self::Period => "PERIOD",
            Self::Return => "RETURN",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminators_map_to_period() {
        for c in ['.', '!', '?'] {
            assert_eq!(TriggerKind::for_char(c), Some(TriggerKind::Period));
        }
    }

    #[test]
    fn comma_is_not_a_trigger() {
        assert_eq!(TriggerKind::for_char(','), None);
        assert_eq!(TriggerKind::for_key(&Key::Char(',')), None);
    }

    #[test]
    fn control_keys_are_not_triggers() {
        for key in [Key::Delete, Key::Tab, Key::Shift, Key::CapsLock] {
            assert_eq!(TriggerKind::for_key(&key), None);
        }
    }

    #[test]
    fn only_return_is_deferred() {
        assert!(TriggerKind::Return.is_deferred());
        assert!(!TriggerKind::Space.is_deferred());
        assert!(!TriggerKind::Period.is_deferred());
    }

    #[test]
    fn labels() {
        assert_eq!(TriggerKind::Space.to_string(), "SPACE");
        assert_eq!(TriggerKind::Period.to_string(), "PERIOD");
        assert_eq!(TriggerKind::Return.to_string(), "RETURN");
    }
}
