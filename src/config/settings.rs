//! Application settings structs, defaults and persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`.
//! Every struct is `#[serde(default)]`, so a settings file written by an
//! older version (or edited by hand) loads with missing fields filled from
//! the defaults.
//!
//! Settings are stored as TOML and can be exported to / imported from a
//! pretty-printed JSON file for sharing between machines.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// SpeechBackend
// ---------------------------------------------------------------------------

/// Which system program produces speech.
///
/// | Variant    | Program      | Platform          |
/// |------------|--------------|-------------------|
/// | `EspeakNg` | `espeak-ng`  | Linux / Windows   |
/// | `Say`      | `say`        | macOS             |
/// | `SpdSay`   | `spd-say`    | Linux (speechd)   |
/// | `Custom`   | any program reading text on stdin | any |
/// | `Disabled` | none         | silent            |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpeechBackend {
    EspeakNg,
    Say,
    SpdSay,
    /// A program that reads the text to speak from stdin.
    ///
    /// `{voice}`, `{rate}` (multiplier, e.g. `1.50`) and `{wpm}` in `args`
    /// are replaced per utterance.  An argument containing `{voice}` is left
    /// out when no voice is set, so write it as one argument
    /// (`--voice={voice}`).  Without placeholders voice and rate are not
    /// passed on.
    Custom { program: String, args: Vec<String> },
    Disabled,
}

impl Default for SpeechBackend {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Say
        } else {
            Self::EspeakNg
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speak words and sentences while typing.
    pub auto_read: bool,
    /// Voice identifier understood by the backend; `None` = platform default.
    pub voice: Option<String>,
    /// Speaking-rate multiplier (typical range 0.5 to 2.0).
    pub rate: f32,
    /// Speech program.
    pub backend: SpeechBackend,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            auto_read: false,
            voice: None,
            rate: 1.0,
            backend: SpeechBackend::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyboardLayout / KeyboardConfig
// ---------------------------------------------------------------------------

/// Which on-screen keyboard rows are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardLayout {
    /// Letters and `, . ?`.
    Basic,
    /// Basic plus a number row.
    WithNumbers,
    /// No on-screen keyboard.
    None,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::Basic
    }
}

/// On-screen keyboard settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub layout: KeyboardLayout,
    /// Tint keys by category (vowel, consonant, punctuation, ...).
    pub color_coding: bool,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use simple_writer::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Speech and auto-read settings.
    pub speech: SpeechConfig,
    /// On-screen keyboard settings.
    pub keyboard: KeyboardConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Delete the settings file at `path` (if any) and return the defaults.
    pub fn reset_at(path: &Path) -> Result<Self> {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("removing {}", path.display()))?;
        }
        Ok(Self::default())
    }

    /// Render as pretty JSON for export.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse exported JSON; fields absent from `json` take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid settings file")
    }

    /// Write an exported settings file.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing {}", path.display()))
    }

    /// Read an exported settings file.
    pub fn import_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&json)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A default `AppConfig` survives a TOML round trip.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.speech.auto_read, loaded.speech.auto_read);
        assert_eq!(original.speech.voice, loaded.speech.voice);
        assert_eq!(original.speech.rate, loaded.speech.rate);
        assert_eq!(original.speech.backend, loaded.speech.backend);
        assert_eq!(original.keyboard.layout, loaded.keyboard.layout);
        assert_eq!(original.keyboard.color_coding, loaded.keyboard.color_coding);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert!(!config.speech.auto_read);
        assert_eq!(config.keyboard.layout, KeyboardLayout::Basic);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(!cfg.speech.auto_read);
        assert!(cfg.speech.voice.is_none());
        assert_eq!(cfg.speech.rate, 1.0);
        assert_eq!(cfg.keyboard.layout, KeyboardLayout::Basic);
        assert!(!cfg.keyboard.color_coding);
    }

    /// Modified values, including a table-valued backend, survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.speech.auto_read = true;
        cfg.speech.voice = Some("en-gb".into());
        cfg.speech.rate = 1.25;
        cfg.speech.backend = SpeechBackend::Custom {
            program: "piper-say".into(),
            args: vec!["--quiet".into()],
        };
        cfg.keyboard.layout = KeyboardLayout::WithNumbers;
        cfg.keyboard.color_coding = true;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert!(loaded.speech.auto_read);
        assert_eq!(loaded.speech.voice.as_deref(), Some("en-gb"));
        assert_eq!(loaded.speech.rate, 1.25);
        assert_eq!(loaded.speech.backend, cfg.speech.backend);
        assert_eq!(loaded.keyboard.layout, KeyboardLayout::WithNumbers);
        assert!(loaded.keyboard.color_coding);
    }

    /// Partial files are merged over the defaults.
    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[speech]\nauto_read = true\n").unwrap();

        let loaded = AppConfig::load_from(&path).expect("load");
        assert!(loaded.speech.auto_read);
        assert_eq!(loaded.speech.rate, 1.0);
        assert_eq!(loaded.keyboard.layout, KeyboardLayout::Basic);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[speech\nrate = ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    // ---- JSON export / import ---

    #[test]
    fn json_export_import_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("export.json");

        let mut cfg = AppConfig::default();
        cfg.speech.voice = Some("en-us".into());
        cfg.speech.rate = 0.75;
        cfg.export_to(&path).expect("export");

        let imported = AppConfig::import_from(&path).expect("import");
        assert_eq!(imported.speech.voice.as_deref(), Some("en-us"));
        assert_eq!(imported.speech.rate, 0.75);
    }

    #[test]
    fn json_import_merges_over_defaults() {
        let cfg = AppConfig::from_json(r#"{ "speech": { "rate": 1.5 } }"#).expect("parse");
        assert_eq!(cfg.speech.rate, 1.5);
        assert!(!cfg.speech.auto_read);
        assert_eq!(cfg.keyboard.layout, KeyboardLayout::Basic);
    }

    #[test]
    fn json_import_rejects_garbage() {
        let err = AppConfig::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("invalid settings file"));
    }

    #[test]
    fn reset_removes_file_and_returns_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.speech.auto_read = true;
        cfg.save_to(&path).expect("save");

        let reset = AppConfig::reset_at(&path).expect("reset");
        assert!(!path.exists());
        assert!(!reset.speech.auto_read);
        // resetting again is harmless
        assert!(AppConfig::reset_at(&path).is_ok());
    }
}
