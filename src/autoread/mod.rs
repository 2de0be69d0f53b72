//! Auto-read: speech feedback while typing.
//!
//! This module provides:
//! * [`TriggerKind`]: `SPACE`, `PERIOD`, `RETURN`, and which keys cause them.
//! * [`AutoReader`]: decides what to speak for each trigger.
//! * [`DeferredTriggers`]: triggers held until the current edit is committed.
//!
//! # Flow
//!
//! ```text
//! key press ──▶ document edit ──▶ TriggerKind::for_key
//!                                   │
//!                 SPACE / PERIOD ───┤──▶ AutoReader::on_trigger (now)
//!                 RETURN ───────────┘──▶ AutoReader::defer ─▶ settle() after the edit
//!                                                │
//!                                EditorPort::text_between(0, caret)
//!                                                │
//!                       last_word / trailing_word / last_sentence
//!                                                │
//!                        SpeechDispatcher::speak(word, interrupt = true)
//!                        SpeechDispatcher::speak(sentence, interrupt = false)
//! ```

pub mod deferred;
pub mod engine;
pub mod trigger;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use deferred::DeferredTriggers;
pub use engine::AutoReader;
pub use trigger::TriggerKind;
