//! Configuration module for Simple Writer.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for speech and the
//! on-screen keyboard, `AppPaths` for cross-platform directories, TOML
//! persistence via `AppConfig::load` / `AppConfig::save`, and JSON
//! export/import for moving settings between machines.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, KeyboardConfig, KeyboardLayout, SpeechBackend, SpeechConfig};
