//! Workspace: a [`WriterSession`] plus where its documents and settings live.
//!
//! The window calls these operations from its buttons; each returns a
//! `Result` so the caller can show the error on the status line.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::app::WriterSession;
use crate::config::{AppConfig, AppPaths};
use crate::editor::TextDocument;
use crate::store::{self, DocumentStore, FileMetadata, StoreError};

/// Session, document store and settings file of one running editor.
#[derive(Debug)]
pub struct Workspace {
    session: WriterSession,
    store: DocumentStore,
    settings_file: PathBuf,
    /// Id of the stored document being edited, once saved or opened.
    current_id: Option<String>,
}

impl Workspace {
    /// Open the document store under `paths` for `session`.
    pub fn open(session: WriterSession, paths: &AppPaths) -> Result<Self, StoreError> {
        Ok(Self {
            session,
            store: DocumentStore::open(&paths.documents_dir)?,
            settings_file: paths.settings_file.clone(),
            current_id: None,
        })
    }

    pub fn session(&self) -> &WriterSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut WriterSession {
        &mut self.session
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    // ── Documents ────────────────────────────────────────────────────────

    pub fn documents(&self) -> Vec<FileMetadata> {
        self.store.list()
    }

    /// Start an empty, unsaved document.
    pub fn new_document(&mut self) {
        self.session.clear();
        self.current_id = None;
    }

    /// Save under `name`, overwriting the document last saved or opened.
    pub fn save(&mut self, name: &str) -> Result<FileMetadata, StoreError> {
        let meta = self.store.save(
            name,
            self.session.document(),
            Some(self.session.config()),
            self.current_id.as_deref(),
        )?;
        self.current_id = Some(meta.id.clone());
        Ok(meta)
    }

    /// Open a stored document, adopting the settings saved with it.
    pub fn open_document(&mut self, id: &str) -> Result<(), StoreError> {
        let stored = self.store.load(id)?;
        if let Some(settings) = stored.settings.clone() {
            self.session.apply_config(settings);
        }
        self.session.replace_document(stored.to_document());
        self.current_id = Some(stored.id);
        Ok(())
    }

    pub fn rename(&self, id: &str, name: &str) -> Result<(), StoreError> {
        self.store.rename(id, name)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id)?;
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        Ok(())
    }

    /// Replace the document with a `.txt` file's paragraphs.
    pub fn import_txt(&mut self, path: &Path) -> Result<(), StoreError> {
        let paragraphs = store::import_txt(path)?;
        self.session
            .replace_document(TextDocument::from_paragraphs(&paragraphs));
        self.current_id = None;
        Ok(())
    }

    pub fn export_txt(&self, path: &Path) -> Result<(), StoreError> {
        store::export_txt(path, self.session.document())
    }

    // ── Settings ─────────────────────────────────────────────────────────

    pub fn save_settings(&self) -> Result<()> {
        self.session.config().save_to(&self.settings_file)
    }

    pub fn export_settings(&self, path: &Path) -> Result<()> {
        self.session.config().export_to(path)
    }

    /// Adopt an exported settings file and persist it.
    pub fn import_settings(&mut self, path: &Path) -> Result<()> {
        let config = AppConfig::import_from(path)?;
        self.session.apply_config(config);
        self.save_settings()
    }

    /// Delete the settings file and return every setting to its default.
    pub fn reset_settings(&mut self) -> Result<()> {
        let config = AppConfig::reset_at(&self.settings_file)?;
        self.session.apply_config(config);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
