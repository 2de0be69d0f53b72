//! The auto-read trigger engine.
//!
//! On every trigger the engine reads the text before the caret through
//! [`EditorPort`] and decides what to speak:
//!
//! | Trigger  | Guard (no speech)                      | Speaks                                    |
//! |----------|----------------------------------------|-------------------------------------------|
//! | `SPACE`  | two whitespace chars before the caret  | last word, unless it ends in `.`/`!`/`?`  |
//! | `PERIOD` | none                                   | word before the terminator, then sentence |
//! | `RETURN` | text already ends in a terminator      | last word, then sentence                  |
//!
//! The word always interrupts (cancels whatever is playing); the sentence is
//! always queued behind it.  The word is skipped when it is the whole
//! sentence, so "Cat." is spoken once.
//!
//! Nothing here keeps state between calls apart from the enabled flag and the
//! queue of deferred triggers.

use crate::editor::EditorPort;
use crate::speech::SpeechDispatcher;
use crate::text::{
    comparison_key, ends_with_terminator, is_terminator, last_sentence, last_word, trailing_word,
    LINE_BREAK,
};

use super::{DeferredTriggers, TriggerKind};

// ---------------------------------------------------------------------------
// AutoReader
// ---------------------------------------------------------------------------

/// Speaks words and sentences as they are typed.
///
/// Disabled by default; while disabled every entry point returns without
/// reading the editor or touching the dispatcher.
///
/// ```
/// use std::sync::Arc;
/// use simple_writer::autoread::{AutoReader, TriggerKind};
/// use simple_writer::editor::TextDocument;
/// use simple_writer::speech::{RecordingEngine, SpeechDispatcher};
///
/// let engine = RecordingEngine::new();
/// let mut reader = AutoReader::new(SpeechDispatcher::new(Arc::new(engine.clone())));
/// reader.set_enabled(true);
///
/// let doc = TextDocument::from_text("The big cat.");
/// reader.on_trigger(TriggerKind::Period, &doc);
///
/// assert_eq!(
///     engine.spoken(),
///     vec![("cat ".to_string(), true), ("The big cat. ".to_string(), false)]
/// );
/// ```
#[derive(Debug)]
pub struct AutoReader {
    enabled: bool,
    speech: SpeechDispatcher,
    deferred: DeferredTriggers,
}

impl AutoReader {
    pub fn new(speech: SpeechDispatcher) -> Self {
        Self {
            enabled: false,
            speech,
            deferred: DeferredTriggers::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn auto-read on or off.  Turning it off drops pending triggers.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("auto-read {}", if enabled { "on" } else { "off" });
        }
        self.enabled = enabled;
        if !enabled {
            self.deferred.clear();
        }
    }

    pub fn speech(&self) -> &SpeechDispatcher {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut SpeechDispatcher {
        &mut self.speech
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Handle `kind` against the editor's current state.
    pub fn on_trigger<E: EditorPort + ?Sized>(&self, kind: TriggerKind, editor: &E) {
        if !self.enabled {
            return;
        }
        let Some(selection) = editor.current_selection() else {
            log::debug!("{kind}: no caret, nothing to read");
            return;
        };

        let text_before = editor.text_between(0, selection.from, LINE_BREAK);

        match kind {
            TriggerKind::Space => self.read_word(&text_before),
            TriggerKind::Period => self.read_finished_sentence(&text_before),
            TriggerKind::Return => self.read_finished_line(&text_before),
        }
    }

    /// Queue `kind` to run at the next [`settle`](Self::settle).
    pub fn defer(&mut self, kind: TriggerKind) {
        if self.enabled {
            self.deferred.post(kind);
        }
    }

    /// Run every deferred trigger, oldest first, against the now-committed
    /// editor state.
    pub fn settle<E: EditorPort + ?Sized>(&mut self, editor: &E) {
        while let Some(kind) = self.deferred.pop() {
            self.on_trigger(kind, editor);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.deferred.is_empty()
    }

    // -----------------------------------------------------------------------
    // Per-trigger behaviour
    // -----------------------------------------------------------------------

    fn read_word(&self, text_before: &str) {
        let mut tail = text_before.chars().rev();
        if let (Some(last), Some(prev)) = (tail.next(), tail.next()) {
            if last.is_whitespace() && prev.is_whitespace() {
                log::debug!("SPACE: repeated whitespace, skipped");
                return;
            }
        }

        let word = last_word(text_before.trim());
        if word.is_empty() || ends_with_terminator(word) {
            return;
        }
        self.speech.speak(word, true);
    }

    fn read_finished_sentence(&self, text_before: &str) {
        let trimmed = text_before.trim();
        let Some(punctuation) = trimmed.chars().next_back() else {
            return;
        };
        if !is_terminator(punctuation) {
            log::debug!("PERIOD: text does not end in a terminator, skipped");
            return;
        }

        let body = &trimmed[..trimmed.len() - punctuation.len_utf8()];
        let word = trailing_word(body);
        let sentence = last_sentence(trimmed);

        self.speak_word_then_sentence(&word, sentence, Some(punctuation));
    }

    fn read_finished_line(&self, text_before: &str) {
        let trimmed = text_before.trim();
        if ends_with_terminator(trimmed) {
            log::debug!("RETURN: line already read at its terminator");
            return;
        }

        let word = trailing_word(trimmed);
        let sentence = last_sentence(text_before);

        self.speak_word_then_sentence(&word, sentence, None);
    }

    fn speak_word_then_sentence(&self, word: &str, sentence: &str, punctuation: Option<char>) {
        if comparison_key(word) != comparison_key(sentence) {
            self.speech.speak(word, true);
        }

        match punctuation {
            Some(p) if !sentence.ends_with(p) => {
                self.speech.speak(&format!("{sentence}{p}"), false);
            }
            _ => self.speech.speak(sentence, false),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
