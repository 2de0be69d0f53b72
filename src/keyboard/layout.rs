//! Keyboard rows and colour-coding categories.

use super::Key;
use crate::config::KeyboardLayout;

const LETTER_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const NUMBER_ROW: &str = "1234567890";
const VOWELS: &str = "aeiou";
const PUNCTUATION: &str = ",.!?;:\"'()[]{}";

/// The rows shown for `layout`, top to bottom.
pub fn rows(layout: KeyboardLayout) -> Vec<Vec<Key>> {
    if layout == KeyboardLayout::None {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(5);
    if layout == KeyboardLayout::WithNumbers {
        rows.push(NUMBER_ROW.chars().map(Key::Char).collect());
    }

    let [top, middle, bottom] = LETTER_ROWS;

    let mut row: Vec<Key> = vec![Key::Tab];
    row.extend(top.chars().map(Key::Char));
    row.push(Key::Delete);
    rows.push(row);

    let mut row: Vec<Key> = vec![Key::CapsLock];
    row.extend(middle.chars().map(Key::Char));
    row.push(Key::Return);
    rows.push(row);

    let mut row: Vec<Key> = vec![Key::Shift];
    row.extend(bottom.chars().map(Key::Char));
    row.extend([',', '.', '?'].map(Key::Char));
    rows.push(row);

    rows.push(vec![Key::Space]);
    rows
}

/// Colour-coding group of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCategory {
    Vowel,
    Consonant,
    Punctuation,
    Number,
    /// Space, Return, Tab, Shift.
    Modifier,
    /// Delete, Caps Lock.
    Control,
    Other,
}

pub fn category(key: &Key) -> KeyCategory {
    match key {
        Key::Space | Key::Return | Key::Tab | Key::Shift => KeyCategory::Modifier,
        Key::Delete | Key::CapsLock => KeyCategory::Control,
        Key::Char(c) => {
            let lower = c.to_ascii_lowercase();
            if VOWELS.contains(lower) {
                KeyCategory::Vowel
            } else if lower.is_ascii_lowercase() {
                KeyCategory::Consonant
            } else if PUNCTUATION.contains(*c) {
                KeyCategory::Punctuation
            } else if c.is_ascii_digit() {
                KeyCategory::Number
            } else {
                KeyCategory::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_layout_has_four_rows() {
        let rows = rows(KeyboardLayout::Basic);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].first(), Some(&Key::Tab));
        assert_eq!(rows[0].last(), Some(&Key::Delete));
        assert_eq!(rows[1].last(), Some(&Key::Return));
        assert_eq!(rows[2].last(), Some(&Key::Char('?')));
        assert_eq!(rows[3], vec![Key::Space]);
    }

    #[test]
    fn number_layout_adds_digit_row() {
        let rows = rows(KeyboardLayout::WithNumbers);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].len(), 10);
        assert_eq!(rows[0][0], Key::Char('1'));
    }

    #[test]
    fn hidden_layout_has_no_rows() {
        assert!(rows(KeyboardLayout::None).is_empty());
    }

    #[test]
    fn every_letter_appears_once() {
        let rows = rows(KeyboardLayout::Basic);
        let letters: Vec<char> = rows
            .iter()
            .flatten()
            .filter_map(|k| match k {
                Key::Char(c) if c.is_ascii_alphabetic() => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(letters.len(), 26);
    }

    #[test]
    fn categories() {
        assert_eq!(category(&Key::Char('a')), KeyCategory::Vowel);
        assert_eq!(category(&Key::Char('E')), KeyCategory::Vowel);
        assert_eq!(category(&Key::Char('k')), KeyCategory::Consonant);
        assert_eq!(category(&Key::Char('?')), KeyCategory::Punctuation);
        assert_eq!(category(&Key::Char('7')), KeyCategory::Number);
        assert_eq!(category(&Key::Space), KeyCategory::Modifier);
        assert_eq!(category(&Key::Delete), KeyCategory::Control);
        assert_eq!(category(&Key::Char('~')), KeyCategory::Other);
    }
}
