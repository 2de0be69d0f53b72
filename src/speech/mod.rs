//! Speech output for Simple Writer.
//!
//! # Architecture
//!
//! ```text
//! AutoReader / manual Read
//!        │ speak(text, interrupt)
//!        ▼
//! ┌──────────────────────┐   normalise, skip blanks,
//! │  SpeechDispatcher    │   append trailing space,
//! │  voice + rate        │   cancel first if interrupting
//! └─────────┬────────────┘
//!           │ cancel_all() / enqueue(Utterance)
//!           ▼
//! ┌──────────────────────┐
//! │ SpeechEngine (trait) │── ProcessSpeechEngine  (system TTS program)
//! │  FIFO queue          │── NullSpeechEngine     (no backend)
//! └──────────────────────┘── RecordingEngine      (tests)
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use simple_writer::config::SpeechBackend;
//! use simple_writer::speech::{ProcessSpeechEngine, SpeechDispatcher};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let engine = ProcessSpeechEngine::spawn(SpeechBackend::EspeakNg, rt.handle()).unwrap();
//! let dispatcher = SpeechDispatcher::new(Arc::new(engine));
//!
//! dispatcher.speak("The big cat.", true);
//! ```

pub mod dispatcher;
pub mod engine;
pub mod process;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use dispatcher::{sanitize_rate, SpeechDispatcher, DEFAULT_RATE, MAX_RATE, MIN_RATE};
pub use engine::{
    NullSpeechEngine, RecordingEngine, SpeechEngine, SpeechError, SpeechEvent, Utterance,
};
pub use process::{command_line, CommandLine, ProcessSpeechEngine};

use std::sync::Arc;

use crate::config::{SpeechBackend, SpeechConfig};

/// Build the engine described by `config`, falling back to
/// [`NullSpeechEngine`] when the backend is disabled or cannot start.
pub fn engine_from_config(
    config: &SpeechConfig,
    runtime: &tokio::runtime::Handle,
) -> Arc<dyn SpeechEngine> {
    if config.backend == SpeechBackend::Disabled {
        log::info!("speech output disabled in settings");
        return Arc::new(NullSpeechEngine);
    }
    match ProcessSpeechEngine::spawn(config.backend.clone(), runtime) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            log::warn!("{e}; speech output disabled");
            Arc::new(NullSpeechEngine)
        }
    }
}
