//! Writer session: keyboard, document and auto-read wired together.
//!
//! # Architecture
//!
//! [`WriterSession`] is the top-level object the front end drives.  It owns:
//!
//! * a [`TextDocument`] (the text being written),
//! * the [`KeyboardState`] (Shift / Caps Lock),
//! * an [`AutoReader`] holding the [`SpeechDispatcher`],
//! * the current [`AppConfig`].
//!
//! # Key handling
//!
//! | Key        | Document edit              | Auto-read                     |
//! |------------|----------------------------|-------------------------------|
//! | character  | insert (shift/caps applied)| `PERIOD` after `.` `!` `?`    |
//! | `SPACE`    | insert `' '`               | `SPACE`                       |
//! | `RETURN`   | new paragraph              | `RETURN`, deferred then settled |
//! | `DELETE`   | delete backward            | none                          |
//! | `TAB`      | insert `'\t'`              | none                          |
//! | `SHIFT` / `CAPSLOCK` | none             | none                          |
//!
//! Every trigger runs after its edit has been applied, and deferred triggers
//! are settled before [`WriterSession::press`] returns, so the next key
//! always sees a quiet queue.

use std::sync::Arc;

use crate::autoread::{AutoReader, TriggerKind};
use crate::config::{AppConfig, KeyboardConfig, SpeechConfig};
use crate::editor::TextDocument;
use crate::keyboard::{Key, KeyboardState};
use crate::speech::{SpeechDispatcher, SpeechEngine};

// ---------------------------------------------------------------------------
// WriterSession
// ---------------------------------------------------------------------------

/// One editing session.
#[derive(Debug)]
pub struct WriterSession {
    document: TextDocument,
    keyboard: KeyboardState,
    reader: AutoReader,
    config: AppConfig,
}

impl WriterSession {
    /// Create a session speaking through `engine`, configured from `config`.
    pub fn new(engine: Arc<dyn SpeechEngine>, config: AppConfig) -> Self {
        let speech = SpeechDispatcher::from_config(engine, &config.speech);
        let mut reader = AutoReader::new(speech);
        reader.set_enabled(config.speech.auto_read);
        Self {
            document: TextDocument::new(),
            keyboard: KeyboardState::default(),
            reader,
            config,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// Direct access for caret moves and selections.
    pub fn document_mut(&mut self) -> &mut TextDocument {
        &mut self.document
    }

    /// Swap in a loaded or imported document.
    pub fn replace_document(&mut self, document: TextDocument) {
        self.document = document;
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_auto_read_enabled(&self) -> bool {
        self.reader.is_enabled()
    }

    // ── Keyboard ─────────────────────────────────────────────────────────

    /// Apply one key press to the document and run the auto-read trigger it
    /// causes.
    pub fn press(&mut self, key: Key) {
        if self.keyboard.press(&key) {
            return;
        }

        match key {
            Key::Char(c) => {
                let typed = self.keyboard.resolve(c);
                let mut buf = [0u8; 4];
                self.document.insert_text(typed.encode_utf8(&mut buf));
            }
            Key::Space => self.document.insert_text(" "),
            Key::Return => self.document.split_paragraph(),
            Key::Delete => self.document.delete_backward(),
            Key::Tab => self.document.insert_text("\t"),
            Key::Shift | Key::CapsLock => {}
        }

        if let Some(kind) = TriggerKind::for_key(&key) {
            if kind.is_deferred() {
                self.reader.defer(kind);
            } else {
                self.reader.on_trigger(kind, &self.document);
            }
        }
        self.reader.settle(&self.document);
    }

    /// Type `text` one key at a time.  `'\n'` presses Return.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let key = match c {
                ' ' => Key::Space,
                '\n' => Key::Return,
                '\t' => Key::Tab,
                c => Key::Char(c),
            };
            self.press(key);
        }
    }

    /// Empty the document and silence any speech.
    pub fn clear(&mut self) {
        self.document.clear();
        self.stop_speech();
    }

    // ── Speech ───────────────────────────────────────────────────────────

    pub fn set_auto_read_enabled(&mut self, enabled: bool) {
        self.reader.set_enabled(enabled);
        self.config.speech.auto_read = enabled;
    }

    /// Run `kind` against the document now, as if its key had just been
    /// pressed.
    pub fn on_auto_read_trigger(&mut self, kind: TriggerKind) {
        self.reader.on_trigger(kind, &self.document);
    }

    /// Silence whatever is playing or queued.
    pub fn stop_speech(&self) {
        self.reader.speech().stop();
    }

    pub fn speak(&self, text: &str, interrupt: bool) {
        self.reader.speech().speak(text, interrupt);
    }

    /// Manual Read: the selection when there is one, otherwise the whole
    /// document.  Always interrupts.
    pub fn read_aloud(&self) {
        let selected = self.document.selected_text();
        let text = if selected.trim().is_empty() {
            self.document.plain_text()
        } else {
            selected
        };
        self.speak(text, true);
    }

    /// Adopt new voice, rate and auto-read settings.  A backend change only
    /// takes effect on the next start.
    pub fn apply_speech_config(&mut self, speech: SpeechConfig) {
        if speech.backend != self.config.speech.backend {
            log::info!("speech backend change applies after restart");
        }
        self.reader.speech_mut().apply_config(&speech);
        self.reader.set_enabled(speech.auto_read);
        self.config.speech = speech;
    }

    pub fn set_voice(&mut self, voice: Option<String>) {
        self.reader.speech_mut().set_voice(voice);
        self.config.speech.voice = self.reader.speech().voice().map(String::from);
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.reader.speech_mut().set_rate(rate);
        self.config.speech.rate = self.reader.speech().rate();
    }

    // ── Settings ─────────────────────────────────────────────────────────

    pub fn set_keyboard_config(&mut self, keyboard: KeyboardConfig) {
        self.config.keyboard = keyboard;
    }

    /// Adopt a whole settings set (speech and keyboard).
    pub fn apply_config(&mut self, config: AppConfig) {
        self.apply_speech_config(config.speech);
        self.config.keyboard = config.keyboard;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::RecordingEngine;

    fn session() -> (WriterSession, RecordingEngine) {
        let engine = RecordingEngine::new();
        let mut session = WriterSession::new(Arc::new(engine.clone()), AppConfig::default());
        session.set_auto_read_enabled(true);
        (session, engine)
    }

    fn said(text: &str, interrupted: bool) -> (String, bool) {
        (format!("{text} "), interrupted)
    }

    #[test]
    fn auto_read_starts_from_config() {
        let mut config = AppConfig::default();
        config.speech.auto_read = true;
        let session = WriterSession::new(Arc::new(RecordingEngine::new()), config);
        assert!(session.is_auto_read_enabled());

        let session = WriterSession::new(Arc::new(RecordingEngine::new()), AppConfig::default());
        assert!(!session.is_auto_read_enabled());
    }

    #[test]
    fn typing_edits_the_document() {
        let (mut session, _engine) = session();
        session.type_text("Hi\tyou");
        session.press(Key::Delete);
        assert_eq!(session.document().plain_text(), "Hi\tyo");
    }

    #[test]
    fn shift_uppercases_one_letter() {
        let (mut session, _engine) = session();
        session.press(Key::Shift);
        session.type_text("ab");
        assert_eq!(session.document().plain_text(), "Ab");
        assert!(!session.keyboard().shift);
    }

    #[test]
    fn space_reads_the_word() {
        let (mut session, engine) = session();
        session.type_text("cat ");
        assert_eq!(engine.spoken(), vec![said("cat", true)]);
    }

    #[test]
    fn period_reads_word_then_sentence() {
        let (mut session, engine) = session();
        session.type_text("The big cat.");
        assert_eq!(
            engine.spoken(),
            vec![
                said("The", true),
                said("big", true),
                said("cat", true),
                said("The big cat.", false),
            ]
        );
    }

    #[test]
    fn return_is_settled_after_the_new_paragraph() {
        let (mut session, engine) = session();
        session.type_text("hello world");
        engine.clear();

        session.press(Key::Return);
        assert_eq!(session.document().paragraphs(), vec!["hello world", ""]);
        assert_eq!(
            engine.spoken(),
            vec![said("world", true), said("hello world", false)]
        );
    }

    #[test]
    fn delete_and_tab_are_silent() {
        let (mut session, engine) = session();
        session.type_text("ab");
        session.press(Key::Delete);
        session.press(Key::Tab);
        assert!(engine.events().is_empty());
    }

    #[test]
    fn disabled_session_stays_quiet() {
        let (mut session, engine) = session();
        session.set_auto_read_enabled(false);
        session.type_text("The cat sat.\nNext ");
        assert!(engine.events().is_empty());
        assert!(!session.config().speech.auto_read);
    }

    #[test]
    fn read_aloud_prefers_the_selection() {
        let (mut session, engine) = session();
        session.set_auto_read_enabled(false);
        session.type_text("one two three");

        session.read_aloud();
        session.document_mut().set_selection(4, 7);
        session.read_aloud();

        assert_eq!(
            engine.spoken(),
            vec![said("one two three", true), said("two", true)]
        );
    }

    #[test]
    fn read_aloud_on_empty_document_is_silent() {
        let (session, engine) = session();
        session.read_aloud();
        assert!(engine.events().is_empty());
    }

    #[test]
    fn manual_trigger_runs_against_current_text() {
        let (mut session, engine) = session();
        session.replace_document(TextDocument::from_text("Done now."));
        session.on_auto_read_trigger(TriggerKind::Period);
        assert_eq!(
            engine.spoken(),
            vec![said("now", true), said("Done now.", false)]
        );
    }

    #[test]
    fn clear_empties_and_cancels() {
        let (mut session, engine) = session();
        session.set_auto_read_enabled(false);
        session.type_text("text");
        session.clear();
        assert!(session.document().is_empty());
        assert_eq!(engine.events(), vec![crate::speech::SpeechEvent::CancelAll]);
    }

    #[test]
    fn speech_config_is_applied() {
        let (mut session, engine) = session();
        let speech = SpeechConfig {
            auto_read: false,
            voice: Some("en-gb".into()),
            rate: 2.0,
            ..SpeechConfig::default()
        };
        session.apply_speech_config(speech);

        assert!(!session.is_auto_read_enabled());
        session.speak("hi", false);
        let events = engine.events();
        let crate::speech::SpeechEvent::Enqueue(utterance) = &events[0] else {
            panic!("expected an utterance, got {events:?}");
        };
        assert_eq!(utterance.voice.as_deref(), Some("en-gb"));
        assert_eq!(utterance.rate, 2.0);
    }

    #[test]
    fn whole_config_replaces_keyboard_settings() {
        let (mut session, _engine) = session();
        session.set_keyboard_config(KeyboardConfig {
            layout: crate::config::KeyboardLayout::WithNumbers,
            color_coding: true,
        });
        assert!(session.config().keyboard.color_coding);

        session.apply_config(AppConfig::default());
        assert_eq!(session.config().keyboard, KeyboardConfig::default());
        assert!(!session.is_auto_read_enabled());
    }

    #[test]
    fn rate_is_sanitised_into_config() {
        let (mut session, _engine) = session();
        session.set_rate(f32::NAN);
        assert_eq!(session.config().speech.rate, 1.0);
        session.set_voice(Some("  ".into()));
        assert_eq!(session.config().speech.voice, None);
    }
}
