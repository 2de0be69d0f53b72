//! Speech engine trait, utterance type and in-process engines.
//!
//! # Overview
//!
//! [`SpeechEngine`] is the seam between the auto-read core and whatever
//! actually produces audio.  It owns a FIFO queue: [`enqueue`] appends,
//! [`cancel_all`] stops the current utterance and drops everything queued.
//!
//! * [`ProcessSpeechEngine`](crate::speech::ProcessSpeechEngine): plays
//!   through a system TTS program.
//! * [`NullSpeechEngine`]: accepts and discards everything; used when no
//!   backend is available.
//! * [`RecordingEngine`]: records every call in order; used by tests.
//!
//! [`enqueue`]: SpeechEngine::enqueue
//! [`cancel_all`]: SpeechEngine::cancel_all

use std::sync::{Arc, Mutex};

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors a speech engine can report.  The dispatcher logs and discards them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpeechError {
    /// No speech backend is available on this platform.
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),

    /// The engine's worker has shut down and no longer accepts commands.
    #[error("speech worker stopped")]
    WorkerStopped,

    /// The backend program could not be started.
    #[error("cannot start speech program `{program}`: {reason}")]
    Spawn { program: String, reason: String },
}

// ---------------------------------------------------------------------------
// Utterance
// ---------------------------------------------------------------------------

/// A single piece of text handed to the engine, with its voice settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak, already normalised.
    pub text: String,
    /// Stable voice identifier; `None` means the platform default.
    pub voice: Option<String>,
    /// Speaking-rate multiplier (1.0 = normal).
    pub rate: f32,
}

impl Utterance {
    /// Utterance with the platform default voice at normal rate.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            rate: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe speech queue.
///
/// Implementations must never block the caller until speech finishes.
pub trait SpeechEngine: Send + Sync {
    /// Append `utterance` to the end of the queue.
    fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Stop the utterance being spoken and drop everything queued.
    fn cancel_all(&self) -> Result<(), SpeechError>;

    /// Short name for logs and the status line.
    fn name(&self) -> &str;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechEngine>) {}
};

// ---------------------------------------------------------------------------
// NullSpeechEngine
// ---------------------------------------------------------------------------

/// Engine used when speech is disabled or no backend could be found.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeechEngine;

impl SpeechEngine for NullSpeechEngine {
    fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError> {
        log::debug!("speech disabled, dropping utterance ({} chars)", utterance.text.len());
        Ok(())
    }

    fn cancel_all(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

// ---------------------------------------------------------------------------
// RecordingEngine
// ---------------------------------------------------------------------------

/// One call received by a [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Enqueue(Utterance),
    CancelAll,
}

/// Engine that records calls instead of speaking.
///
/// Clones share the same log, so a test can keep one handle and give another
/// to the dispatcher.
#[derive(Debug, Default, Clone)]
pub struct RecordingEngine {
    events: Arc<Mutex<Vec<SpeechEvent>>>,
    failure: Option<SpeechError>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose every call fails with `error` (after being recorded).
    pub fn failing(error: SpeechError) -> Self {
        Self {
            events: Arc::default(),
            failure: Some(error),
        }
    }

    /// Every call so far, in order.
    pub fn events(&self) -> Vec<SpeechEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Enqueued texts paired with whether a cancel came right before them,
    /// i.e. whether they were submitted as interrupting.
    pub fn spoken(&self) -> Vec<(String, bool)> {
        let mut out = Vec::new();
        let mut cancelled = false;
        for event in self.events() {
            match event {
                SpeechEvent::CancelAll => cancelled = true,
                SpeechEvent::Enqueue(u) => {
                    out.push((u.text, cancelled));
                    cancelled = false;
                }
            }
        }
        out
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    fn record(&self, event: SpeechEvent) -> Result<(), SpeechError> {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl SpeechEngine for RecordingEngine {
    fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError> {
        self.record(SpeechEvent::Enqueue(utterance))
    }

    fn cancel_all(&self) -> Result<(), SpeechError> {
        self.record(SpeechEvent::CancelAll)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
