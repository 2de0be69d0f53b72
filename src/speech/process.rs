//! Speech engine backed by a system text-to-speech program.
//!
//! # Design
//!
//! [`ProcessSpeechEngine`] is a cheap handle around an unbounded
//! `tokio::sync::mpsc` sender.  The worker task on the other end owns the
//! FIFO queue and at most one running child process:
//!
//! ```text
//! enqueue(u)  ──Speak(u)──▶ ┌────────────────────────┐
//! cancel_all ──Cancel────▶ │ worker (tokio task)     │
//!                           │  queue: VecDeque        │──spawn──▶ espeak-ng / say / spd-say
//!                           │  current: Option<Child> │◀──exit───
//!                           └────────────────────────┘
//! ```
//!
//! Both commands travel over the same channel, so a cancel followed by an
//! enqueue is always applied in that order.  Cancelling kills the running
//! program; there is no resume.
//!
//! Text is written to the program's stdin so that text starting with `-` is
//! never mistaken for an option.  The write runs in its own task: a long
//! utterance that fills the pipe never holds up a cancel.
//!
//! [`ProcessSpeechEngine::spawn`] looks the program up on `PATH` first, so a
//! missing program is reported once at startup instead of on every utterance.

use std::collections::VecDeque;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use crate::config::SpeechBackend;
use crate::speech::engine::{SpeechEngine, SpeechError, Utterance};

/// espeak-ng and `say` both default to roughly this many words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// Program and arguments for speaking one utterance.  The text itself is fed
/// on stdin.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

/// Build the command line that speaks `utterance` with `backend`.
///
/// Returns `None` for [`SpeechBackend::Disabled`].
pub fn command_line(backend: &SpeechBackend, utterance: &Utterance) -> Option<CommandLine> {
    let wpm = (BASE_WORDS_PER_MINUTE * utterance.rate).round().max(1.0) as u32;
    let mut args = Vec::new();

    let program = match backend {
        SpeechBackend::Disabled => return None,
        SpeechBackend::EspeakNg => {
            args.extend(["-s".to_string(), wpm.to_string()]);
            if let Some(voice) = &utterance.voice {
                args.extend(["-v".to_string(), voice.clone()]);
            }
            args.push("--stdin".to_string());
            "espeak-ng".to_string()
        }
        SpeechBackend::Say => {
            args.extend(["-r".to_string(), wpm.to_string()]);
            if let Some(voice) = &utterance.voice {
                args.extend(["-v".to_string(), voice.clone()]);
            }
            "say".to_string()
        }
        SpeechBackend::SpdSay => {
            // spd-say rates run -100..=100 with 0 as normal speed.
            let rate = ((utterance.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32;
            args.extend(["-w".to_string(), "-e".to_string()]);
            args.extend(["-r".to_string(), rate.to_string()]);
            if let Some(voice) = &utterance.voice {
                args.extend(["-y".to_string(), voice.clone()]);
            }
            "spd-say".to_string()
        }
        SpeechBackend::Custom {
            program,
            args: extra,
        } => {
            args.extend(custom_args(extra, utterance, wpm));
            program.clone()
        }
    };

    Some(CommandLine { program, args })
}

/// Expand `{voice}`, `{rate}` and `{wpm}` in a custom backend's arguments.
/// An argument naming `{voice}` is dropped when no voice is set.
fn custom_args(extra: &[String], utterance: &Utterance, wpm: u32) -> Vec<String> {
    let rate = format!("{:.2}", utterance.rate);
    let wpm = wpm.to_string();
    extra
        .iter()
        .filter(|arg| utterance.voice.is_some() || !arg.contains("{voice}"))
        .map(|arg| {
            arg.replace("{voice}", utterance.voice.as_deref().unwrap_or_default())
                .replace("{rate}", &rate)
                .replace("{wpm}", &wpm)
        })
        .collect()
}

/// The program `backend` runs, or `None` when speech is disabled.
pub fn backend_program(backend: &SpeechBackend) -> Option<&str> {
    match backend {
        SpeechBackend::EspeakNg => Some("espeak-ng"),
        SpeechBackend::Say => Some("say"),
        SpeechBackend::SpdSay => Some("spd-say"),
        SpeechBackend::Custom { program, .. } => Some(program),
        SpeechBackend::Disabled => None,
    }
}

// ---------------------------------------------------------------------------
// ProcessSpeechEngine
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum WorkerCommand {
    Speak(Utterance),
    Cancel,
}

/// [`SpeechEngine`] that plays utterances one at a time through a system
/// TTS program.
#[derive(Debug, Clone)]
pub struct ProcessSpeechEngine {
    tx: mpsc::UnboundedSender<WorkerCommand>,
    program: String,
}

impl ProcessSpeechEngine {
    /// Spawn the worker task for `backend` on `runtime`.
    ///
    /// # Errors
    ///
    /// * [`SpeechError::Unavailable`] when `backend` is
    ///   [`SpeechBackend::Disabled`].
    /// * [`SpeechError::Spawn`] when the backend's program is not on `PATH`.
    pub fn spawn(
        backend: SpeechBackend,
        runtime: &tokio::runtime::Handle,
    ) -> Result<Self, SpeechError> {
        let Some(program) = backend_program(&backend) else {
            return Err(SpeechError::Unavailable("speech backend disabled".into()));
        };
        let path = which::which(program).map_err(|e| SpeechError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;
        log::debug!("speech program: {}", path.display());

        let program = program.to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run_worker(backend, rx));
        Ok(Self { tx, program })
    }

    fn send(&self, command: WorkerCommand) -> Result<(), SpeechError> {
        self.tx.send(command).map_err(|_| SpeechError::WorkerStopped)
    }
}

impl SpeechEngine for ProcessSpeechEngine {
    fn enqueue(&self, utterance: Utterance) -> Result<(), SpeechError> {
        self.send(WorkerCommand::Speak(utterance))
    }

    fn cancel_all(&self) -> Result<(), SpeechError> {
        self.send(WorkerCommand::Cancel)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

enum WorkerEvent {
    Command(Option<WorkerCommand>),
    Finished(std::io::Result<std::process::ExitStatus>),
}

async fn run_worker(backend: SpeechBackend, mut rx: mpsc::UnboundedReceiver<WorkerCommand>) {
    let mut queue: VecDeque<Utterance> = VecDeque::new();
    let mut current: Option<Child> = None;

    log::info!("speech worker started ({backend:?})");

    loop {
        while current.is_none() {
            let Some(next) = queue.pop_front() else { break };
            match start(&backend, &next) {
                Ok(child) => current = child,
                Err(e) => log::warn!("{e}"),
            }
        }

        let event = match current.as_mut() {
            Some(child) => tokio::select! {
                status = child.wait() => WorkerEvent::Finished(status),
                cmd = rx.recv() => WorkerEvent::Command(cmd),
            },
            None => WorkerEvent::Command(rx.recv().await),
        };

        match event {
            WorkerEvent::Finished(status) => {
                match status {
                    Ok(s) if !s.success() => log::debug!("speech program exited with {s}"),
                    Err(e) => log::warn!("waiting on speech program failed: {e}"),
                    _ => {}
                }
                current = None;
            }
            WorkerEvent::Command(Some(WorkerCommand::Speak(u))) => queue.push_back(u),
            WorkerEvent::Command(Some(WorkerCommand::Cancel)) => {
                queue.clear();
                stop(&mut current).await;
            }
            WorkerEvent::Command(None) => {
                stop(&mut current).await;
                break;
            }
        }
    }

    log::info!("speech worker stopped");
}

/// Start the program for `utterance` and feed it the text from a separate
/// task.
fn start(backend: &SpeechBackend, utterance: &Utterance) -> Result<Option<Child>, SpeechError> {
    let Some(line) = command_line(backend, utterance) else {
        return Ok(None);
    };

    let mut child = Command::new(&line.program)
        .args(&line.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SpeechError::Spawn {
            program: line.program.clone(),
            reason: e.to_string(),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        let text = utterance.text.clone();
        let program = line.program;
        tokio::spawn(async move {
            // fails with a broken pipe once the program is killed
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                log::debug!("writing to {program} stopped: {e}");
            }
        });
    }

    Ok(Some(child))
}

async fn stop(current: &mut Option<Child>) {
    if let Some(mut child) = current.take() {
        if let Err(e) = child.kill().await {
            log::debug!("speech program already gone: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
