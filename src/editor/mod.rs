//! Editor adapter.
//!
//! Auto-read never touches a document directly; it reads through the narrow
//! [`EditorPort`] interface:
//!
//! * [`EditorPort::current_selection`]: caret / selection offsets, or `None`
//!   before an editor exists.
//! * [`EditorPort::text_between`]: flattened plain text between two offsets,
//!   paragraph boundaries joined by a caller-chosen separator.
//!
//! [`TextDocument`] is the plain-text document the terminal shell edits; any
//! other editor can be plugged in by implementing the trait.

pub mod document;

pub use document::TextDocument;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Selection offsets in the flattened text coordinate space.  `from == to`
/// is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

impl Selection {
    /// A collapsed selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

// ---------------------------------------------------------------------------
// EditorPort trait
// ---------------------------------------------------------------------------

/// Read-only view of an editor used by the auto-read core.
pub trait EditorPort {
    /// Plain text between `start` and `end` with paragraph boundaries
    /// rendered as `block_separator`.
    fn text_between(&self, start: usize, end: usize, block_separator: char) -> String;

    /// Current selection, or `None` when no caret is available.
    fn current_selection(&self) -> Option<Selection>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_selection_is_empty() {
        assert!(Selection::caret(4).is_empty());
        assert!(!Selection { from: 1, to: 3 }.is_empty());
    }
}
