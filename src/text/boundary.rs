//! Word and sentence boundary extraction over the text before the caret.
//!
//! All positions are counted in `char`s, never bytes, so multi-byte text
//! (accented letters, emoji, Thai) cannot split a code point.

use super::normalize::normalize;

/// Maximum number of characters [`last_sentence`] looks back from the caret.
///
/// Longer sentences are cut from the left for boundary purposes only.
pub const SENTENCE_SCAN_LIMIT: usize = 1000;

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// The line-break character paragraph boundaries are materialised as.
pub const LINE_BREAK: char = '\n';

/// Returns `true` for `.`, `!` and `?`.
pub fn is_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

/// Returns `true` when the last character of `text` is a sentence terminator.
pub fn ends_with_terminator(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_terminator)
}

/// The final whitespace-delimited token of `text`, or `""` when there is none.
///
/// ```
/// use simple_writer::text::last_word;
///
/// assert_eq!(last_word("hello   world  "), "world");
/// assert_eq!(last_word(""), "");
/// ```
pub fn last_word(text: &str) -> &str {
    text.split_whitespace().next_back().unwrap_or("")
}

/// The trailing non-whitespace run of the normalised `text`.
///
/// Unlike [`last_word`] this returns `""` when the text ends in whitespace:
/// only a word that touches the end of the text counts.
pub fn trailing_word(text: &str) -> String {
    let normalized = normalize(text);
    if normalized.chars().next_back().map_or(true, char::is_whitespace) {
        return String::new();
    }
    let start = normalized
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    normalized[start..].to_string()
}

/// The sentence the caret is currently in or has just finished.
///
/// Scans backward starting one character before the end of `text` (the
/// trigger character itself, such as the `.` or newline just typed, is
/// skipped) down to at most [`SENTENCE_SCAN_LIMIT`] characters back.  The
/// sentence starts right after the first `.`, `!`, `?` or line break found,
/// or at the beginning of `text` when none is found in the window.
///
/// ```
/// use simple_writer::text::last_sentence;
///
/// assert_eq!(last_sentence("Hi there. How are you"), "How are you");
/// assert_eq!(last_sentence("The big cat."), "The big cat.");
/// ```
pub fn last_sentence(text: &str) -> &str {
    let sentence_start = text
        .char_indices()
        .rev()
        .skip(1)
        .take(SENTENCE_SCAN_LIMIT - 1)
        .find(|&(_, c)| is_terminator(c) || c == LINE_BREAK)
        .map_or(0, |(byte, c)| byte + c.len_utf8());

    text[sentence_start..].trim()
}

/// Equality key used to detect a word that is the whole sentence.
///
/// Lowercases, then keeps only ASCII `a-z` and `0-9`.
pub fn comparison_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
