//! Whitespace normalisation applied before any text reaches the speech
//! engine or the boundary extractor.
//!
//! | Class                    | Examples                               | Result        |
//! |--------------------------|----------------------------------------|---------------|
//! | Zero-width space         | U+200B                                 | plain `' '`   |
//! | Joiners, byte-order mark | U+200C, U+200D, U+FEFF                 | removed       |
//! | Unicode space separators | U+00A0, U+2000..U+200A, U+2028, U+3000 | plain `' '`   |
//!
//! Joiners are removed rather than spaced so joined words (Persian
//! half-spaces, emoji sequences) stay one word.
//!
//! The result is trimmed, so text made only of these characters normalises to
//! the empty string.

/// Zero-width space.
const ZWSP: char = '\u{200B}';
/// Zero-width non-joiner.
const ZWNJ: char = '\u{200C}';
/// Zero-width joiner.
const ZWJ: char = '\u{200D}';
/// Byte-order mark / zero-width no-break space.
const BOM: char = '\u{FEFF}';

/// Returns `true` for the invisible formatting characters that carry no
/// speakable content.
pub fn is_invisible(c: char) -> bool {
    matches!(c, ZWSP | ZWNJ | ZWJ | BOM)
}

/// Returns `true` for every Unicode space separator (category `Zs`) plus the
/// line and paragraph separators, excluding the ASCII space itself.
pub fn is_exotic_space(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Clean `text` for speech synthesis and boundary analysis.
///
/// Total and side-effect free.
///
/// ```
/// use simple_writer::text::normalize;
///
/// assert_eq!(normalize("a\u{200B}b\u{00A0}c"), "a b c");
/// assert_eq!(normalize("\u{FEFF}  \u{2003}"), "");
/// ```
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter_map(|c| match c {
            ZWSP => Some(' '),
            c if is_invisible(c) => None,
            c if is_exotic_space(c) => Some(' '),
            c => Some(c),
        })
        .collect();

    cleaned.trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
