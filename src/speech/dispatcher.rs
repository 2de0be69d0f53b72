//! Speech dispatcher: the single entry point for anything that wants to be
//! spoken.
//!
//! [`SpeechDispatcher::speak`] normalises the text, drops it when nothing
//! speakable is left, applies the configured voice and rate, and either
//! preempts (`interrupt = true`) or queues behind (`interrupt = false`)
//! whatever the engine is already doing.
//!
//! Engine failures never reach the caller: auto-read is best-effort and must
//! not disturb typing.

use std::sync::Arc;

use crate::config::SpeechConfig;
use crate::speech::engine::{SpeechEngine, Utterance};
use crate::text::normalize;

/// Lowest accepted rate multiplier.
pub const MIN_RATE: f32 = 0.1;
/// Highest accepted rate multiplier.
pub const MAX_RATE: f32 = 10.0;
/// Rate used when none (or a nonsensical one) is configured.
pub const DEFAULT_RATE: f32 = 1.0;

/// Clamp a configured rate into `MIN_RATE..=MAX_RATE`, replacing NaN,
/// infinities and non-positive values with [`DEFAULT_RATE`].
pub fn sanitize_rate(rate: f32) -> f32 {
    if !rate.is_finite() || rate <= 0.0 {
        DEFAULT_RATE
    } else {
        rate.clamp(MIN_RATE, MAX_RATE)
    }
}

// ---------------------------------------------------------------------------
// SpeechDispatcher
// ---------------------------------------------------------------------------

/// Builds utterances and submits them to a [`SpeechEngine`].
///
/// ```
/// use std::sync::Arc;
/// use simple_writer::speech::{RecordingEngine, SpeechDispatcher};
///
/// let engine = RecordingEngine::new();
/// let dispatcher = SpeechDispatcher::new(Arc::new(engine.clone()));
///
/// dispatcher.speak("cat", true);
/// dispatcher.speak("   ", false); // nothing speakable, skipped
///
/// assert_eq!(engine.spoken(), vec![("cat ".to_string(), true)]);
/// ```
#[derive(Clone)]
pub struct SpeechDispatcher {
    engine: Arc<dyn SpeechEngine>,
    voice: Option<String>,
    rate: f32,
}

impl std::fmt::Debug for SpeechDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechDispatcher")
            .field("voice", &self.voice)
            .field("rate", &self.rate)
            .finish_non_exhaustive()
    }
}

impl SpeechDispatcher {
    /// Dispatcher using the platform default voice at normal rate.
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            voice: None,
            rate: DEFAULT_RATE,
        }
    }

    /// Dispatcher with voice and rate taken from `config`.
    pub fn from_config(engine: Arc<dyn SpeechEngine>, config: &SpeechConfig) -> Self {
        let mut dispatcher = Self::new(engine);
        dispatcher.apply_config(config);
        dispatcher
    }

    /// Re-read voice and rate from `config`.
    pub fn apply_config(&mut self, config: &SpeechConfig) {
        self.set_voice(config.voice.clone());
        self.set_rate(config.rate);
    }

    /// Select a voice by stable identifier; empty or `None` means default.
    pub fn set_voice(&mut self, voice: Option<String>) {
        self.voice = voice.filter(|v| !v.trim().is_empty());
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = sanitize_rate(rate);
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Speak `text`.
    ///
    /// * Nothing happens when `normalize(text)` is empty.
    /// * A single trailing space is appended so short words are not read
    ///   out letter by letter.
    /// * `interrupt = true` cancels everything playing or queued first.
    /// * `interrupt = false` queues behind earlier utterances.
    pub fn speak(&self, text: &str, interrupt: bool) {
        let cleaned = normalize(text);
        if cleaned.is_empty() {
            return;
        }

        if interrupt {
            if let Err(e) = self.engine.cancel_all() {
                log::warn!("speech cancel failed: {e}");
            }
        }

        let utterance = Utterance {
            text: format!("{cleaned} "),
            voice: self.voice.clone(),
            rate: self.rate,
        };

        log::debug!(
            "speak interrupt={interrupt} chars={}",
            utterance.text.chars().count()
        );

        if let Err(e) = self.engine.enqueue(utterance) {
            log::warn!("speech enqueue failed: {e}");
        }
    }

    /// Stop all speech without queuing anything new.
    pub fn stop(&self) {
        if let Err(e) = self.engine.cancel_all() {
            log::warn!("speech cancel failed: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::engine::{RecordingEngine, SpeechError, SpeechEvent};

    fn dispatcher() -> (SpeechDispatcher, RecordingEngine) {
        let engine = RecordingEngine::new();
        (SpeechDispatcher::new(Arc::new(engine.clone())), engine)
    }

    // ---- empty-text guard ---

    #[test]
    fn blank_text_is_never_submitted() {
        let (d, engine) = dispatcher();
        for text in ["", "   ", "\u{200B}", "\u{00A0}\u{FEFF}", "\n\t"] {
            d.speak(text, true);
            d.speak(text, false);
        }
        assert!(engine.events().is_empty());
    }

    #[test]
    fn speakable_text_is_submitted() {
        let (d, engine) = dispatcher();
        d.speak(" x ", false);
        assert_eq!(engine.spoken(), vec![("x ".to_string(), false)]);
    }

    // ---- interrupt semantics ---

    #[test]
    fn interrupt_cancels_before_enqueue() {
        let (d, engine) = dispatcher();
        d.speak("hello", true);
        let events = engine.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SpeechEvent::CancelAll);
        assert!(matches!(&events[1], SpeechEvent::Enqueue(u) if u.text == "hello "));
    }

    #[test]
    fn queued_calls_keep_order() {
        let (d, engine) = dispatcher();
        d.speak("one", false);
        d.speak("two", false);
        d.speak("three", false);
        assert_eq!(
            engine.spoken(),
            vec![
                ("one ".to_string(), false),
                ("two ".to_string(), false),
                ("three ".to_string(), false),
            ]
        );
    }

    #[test]
    fn trailing_space_is_appended_once() {
        let (d, engine) = dispatcher();
        d.speak("cat   ", false);
        assert_eq!(engine.spoken()[0].0, "cat ");
    }

    // ---- voice and rate ---

    #[test]
    fn voice_and_rate_are_applied() {
        let (mut d, engine) = dispatcher();
        d.set_voice(Some("en-gb".into()));
        d.set_rate(1.5);
        d.speak("hi", false);
        match &engine.events()[0] {
            SpeechEvent::Enqueue(u) => {
                assert_eq!(u.voice.as_deref(), Some("en-gb"));
                assert!((u.rate - 1.5).abs() < f32::EPSILON);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn blank_voice_means_default() {
        let (mut d, _) = dispatcher();
        d.set_voice(Some("  ".into()));
        assert!(d.voice().is_none());
    }

    #[test]
    fn rate_is_sanitized() {
        assert_eq!(sanitize_rate(f32::NAN), DEFAULT_RATE);
        assert_eq!(sanitize_rate(-1.0), DEFAULT_RATE);
        assert_eq!(sanitize_rate(0.0), DEFAULT_RATE);
        assert_eq!(sanitize_rate(0.01), MIN_RATE);
        assert_eq!(sanitize_rate(50.0), MAX_RATE);
        assert_eq!(sanitize_rate(0.5), 0.5);
    }

    #[test]
    fn from_config_reads_voice_and_rate() {
        let config = SpeechConfig {
            voice: Some("en-us".into()),
            rate: 2.0,
            ..SpeechConfig::default()
        };
        let d = SpeechDispatcher::from_config(Arc::new(RecordingEngine::new()), &config);
        assert_eq!(d.voice(), Some("en-us"));
        assert_eq!(d.rate(), 2.0);
    }

    // ---- failure handling ---

    #[test]
    fn engine_failures_are_swallowed() {
        let engine = RecordingEngine::failing(SpeechError::Unavailable("no audio".into()));
        let d = SpeechDispatcher::new(Arc::new(engine.clone()));
        d.speak("still fine", true);
        d.stop();
        // every call is attempted and no error propagates
        assert_eq!(engine.events().len(), 3);
    }
}
