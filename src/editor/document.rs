//! In-memory plain-text document with a caret.
//!
//! Paragraphs are separated by `'\n'` and every character, separators
//! included, occupies exactly one offset.  Offsets are `char` counts, so the
//! keyboard can never split a multi-byte character.

use super::{EditorPort, Selection};
use crate::text::LINE_BREAK;

/// The document edited by the on-screen keyboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextDocument {
    text: String,
    selection: Selection,
}

impl TextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document containing `text` with the caret at the end.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.set_content(text);
        doc
    }

    /// Document built from `paragraphs`, caret at the end.
    pub fn from_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> Self {
        let joined = paragraphs
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&joined)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whole document as plain text, paragraphs joined by `'\n'`.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.text.split(LINE_BREAK).collect()
    }

    /// Length in offsets (chars).
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Text covered by the current selection (empty for a caret).
    pub fn selected_text(&self) -> &str {
        let start = self.byte_offset(self.selection.from);
        let end = self.byte_offset(self.selection.to);
        &self.text[start..end]
    }

    /// The text before, inside and after the selection.
    pub fn split_at_selection(&self) -> (&str, &str, &str) {
        let start = self.byte_offset(self.selection.from);
        let end = self.byte_offset(self.selection.to);
        (&self.text[..start], &self.text[start..end], &self.text[end..])
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Replace the whole document; the caret moves to the end.
    pub fn set_content(&mut self, text: &str) {
        self.text = text.replace("\r\n", "\n");
        self.selection = Selection::caret(self.len());
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.selection = Selection::default();
    }

    /// Select `from..to`, clamped to the document and put in order.
    pub fn set_selection(&mut self, from: usize, to: usize) {
        let len = self.len();
        let (a, b) = (from.min(len), to.min(len));
        self.selection = Selection {
            from: a.min(b),
            to: a.max(b),
        };
    }

    pub fn set_caret(&mut self, pos: usize) {
        self.set_selection(pos, pos);
    }

    /// Move the caret one character.  With `extend` the selection grows on
    /// that side instead; without it a selection collapses to its edge.
    pub fn move_caret(&mut self, forward: bool, extend: bool) {
        let Selection { from, to } = self.selection;
        match (forward, extend) {
            (true, true) => self.set_selection(from, to + 1),
            (false, true) => self.set_selection(from.saturating_sub(1), to),
            (true, false) if from != to => self.set_caret(to),
            (false, false) if from != to => self.set_caret(from),
            (true, false) => self.set_caret(to + 1),
            (false, false) => self.set_caret(from.saturating_sub(1)),
        }
    }

    /// Insert `text` at the caret, replacing any selection.
    pub fn insert_text(&mut self, text: &str) {
        self.delete_selection();
        let at = self.byte_offset(self.selection.from);
        self.text.insert_str(at, text);
        let caret = self.selection.from + text.chars().count();
        self.selection = Selection::caret(caret);
    }

    /// End the current paragraph and start a new one at the caret.
    pub fn split_paragraph(&mut self) {
        let mut buf = [0u8; 4];
        self.insert_text(LINE_BREAK.encode_utf8(&mut buf));
    }

    /// Delete the selection, or the character before the caret.
    pub fn delete_backward(&mut self) {
        if !self.selection.is_empty() {
            self.delete_selection();
        } else if self.selection.from > 0 {
            let from = self.selection.from;
            self.delete_range(from - 1, from);
        }
    }

    /// Delete `from..to` (clamped); the caret lands at `from`.
    pub fn delete_range(&mut self, from: usize, to: usize) {
        let len = self.len();
        let (from, to) = (from.min(len), to.min(len));
        if from >= to {
            return;
        }
        let start = self.byte_offset(from);
        let end = self.byte_offset(to);
        self.text.replace_range(start..end, "");
        self.selection = Selection::caret(from);
    }

    fn delete_selection(&mut self) {
        let Selection { from, to } = self.selection;
        if from != to {
            self.delete_range(from, to);
        }
    }

    /// Byte index of char offset `pos`, or the end of the text.
    fn byte_offset(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

impl EditorPort for TextDocument {
    fn text_between(&self, start: usize, end: usize, block_separator: char) -> String {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        if start >= end {
            return String::new();
        }
        self.text
            .chars()
            .skip(start)
            .take(end - start)
            .map(|c| if c == LINE_BREAK { block_separator } else { c })
            .collect()
    }

    fn current_selection(&self) -> Option<Selection> {
        Some(self.selection)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
