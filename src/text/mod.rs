//! Text analysis used by auto-read.
//!
//! * [`normalize`]: strips invisible characters and exotic whitespace.
//! * [`last_word`] / [`trailing_word`]: the word just typed.
//! * [`last_sentence`]: the sentence just typed, bounded backward scan.
//! * [`comparison_key`]: reduction used to spot a one-word sentence.
//!
//! # Usage
//!
//! ```
//! use simple_writer::text::{comparison_key, last_sentence, trailing_word};
//!
//! let before_caret = "It rained. The big cat.";
//! let sentence = last_sentence(before_caret);
//! let word = trailing_word(before_caret.trim_end_matches('.'));
//!
//! assert_eq!(sentence, "The big cat.");
//! assert_eq!(word, "cat");
//! assert_ne!(comparison_key(&word), comparison_key(sentence));
//! ```

pub mod boundary;
pub mod normalize;

pub use boundary::{
    comparison_key, ends_with_terminator, is_terminator, last_sentence, last_word, trailing_word,
    LINE_BREAK, SENTENCE_SCAN_LIMIT, SENTENCE_TERMINATORS,
};
pub use normalize::normalize;
