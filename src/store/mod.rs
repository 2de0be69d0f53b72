//! Local document store and plain-text import/export.
//!
//! # Layout
//!
//! ```text
//! documents/
//!   files.json          ← [FileMetadata], newest write wins
//!   <id>.json           ← StoredDocument
//! ```
//!
//! A missing or unreadable index is treated as an empty store (and logged),
//! so a damaged index never stops the editor from starting.
//!
//! # Usage
//!
//! ```no_run
//! use simple_writer::config::AppPaths;
//! use simple_writer::editor::TextDocument;
//! use simple_writer::store::DocumentStore;
//!
//! let store = DocumentStore::open(AppPaths::new().documents_dir).unwrap();
//! let doc = TextDocument::from_text("Dear diary.");
//! let meta = store.save("diary", &doc, None, None).unwrap();
//! let loaded = store.load(&meta.id).unwrap();
//! assert_eq!(loaded.paragraphs, vec!["Dear diary."]);
//! ```

pub mod text;

pub use text::{export_txt, import_txt};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::editor::TextDocument;

const INDEX_FILE: &str = "files.json";

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from the document store and plain-text import/export.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document with id {0:?}")]
    NotFound(String),

    #[error("invalid document id {0:?}")]
    InvalidId(String),

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// How a stored document's content is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Paragraphs of plain text.
    Text,
}

/// Entry in the store index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    /// Milliseconds since the Unix epoch.
    pub last_modified_ms: u64,
    pub kind: FileKind,
}

/// A saved document, optionally with the settings it was written with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub paragraphs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppConfig>,
}

impl StoredDocument {
    pub fn to_document(&self) -> TextDocument {
        TextDocument::from_paragraphs(&self.paragraphs)
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// JSON-file backed document store rooted at one directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Open (creating if needed) the store at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All documents, in the order they were first saved.
    pub fn list(&self) -> Vec<FileMetadata> {
        let path = self.dir.join(INDEX_FILE);
        let Ok(json) = std::fs::read_to_string(&path) else {
            return Vec::new();
        };
        match serde_json::from_str(&json) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("ignoring unreadable index {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Save `doc` under `name`.  With `existing_id` the stored document is
    /// overwritten and its index entry renamed; otherwise a new id is made.
    pub fn save(
        &self,
        name: &str,
        doc: &TextDocument,
        settings: Option<&AppConfig>,
        existing_id: Option<&str>,
    ) -> Result<FileMetadata, StoreError> {
        let id = match existing_id {
            Some(id) => {
                validate_id(id)?;
                id.to_string()
            }
            None => new_id(),
        };
        let now = now_ms();

        let mut list = self.list();
        let meta = match list.iter_mut().find(|m| m.id == id) {
            Some(entry) => {
                entry.name = name.to_string();
                entry.last_modified_ms = now;
                entry.clone()
            }
            None => {
                let entry = FileMetadata {
                    id: id.clone(),
                    name: name.to_string(),
                    last_modified_ms: now,
                    kind: FileKind::Text,
                };
                list.push(entry.clone());
                entry
            }
        };

        let stored = StoredDocument {
            id: id.clone(),
            paragraphs: doc.paragraphs().into_iter().map(String::from).collect(),
            settings: settings.cloned(),
        };
        self.write_json(&self.document_path(&id), &stored)?;
        self.write_json(&self.dir.join(INDEX_FILE), &list)?;

        log::info!("saved document {:?} as {id}", meta.name);
        Ok(meta)
    }

    pub fn load(&self, id: &str) -> Result<StoredDocument, StoreError> {
        validate_id(id)?;
        let path = self.document_path(id);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        serde_json::from_str(&json).map_err(|source| StoreError::Json { path, source })
    }

    /// Remove a document and its index entry.  Deleting an unknown id is
    /// not an error.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        validate_id(id)?;
        let list: Vec<FileMetadata> = self.list().into_iter().filter(|m| m.id != id).collect();
        self.write_json(&self.dir.join(INDEX_FILE), &list)?;

        let path = self.document_path(id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    pub fn rename(&self, id: &str, new_name: &str) -> Result<(), StoreError> {
        let mut list = self.list();
        let entry = list
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.name = new_name.to_string();
        self.write_json(&self.dir.join(INDEX_FILE), &list)
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| StoreError::io(path, e))
    }
}

/// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
fn validate_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Time-based id with a process-wide counter so ids made in the same
/// millisecond still differ.
fn new_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", now_ms(), seq)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (DocumentStore, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let store = DocumentStore::open(dir.path().join("documents")).expect("open");
        (store, dir)
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (store, _dir) = store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn save_then_load() {
        let (store, _dir) = store();
        let doc = TextDocument::from_text("First line.\nSecond line");
        let meta = store.save("notes", &doc, None, None).expect("save");

        assert_eq!(meta.name, "notes");
        assert_eq!(meta.kind, FileKind::Text);
        assert_eq!(store.list(), vec![meta.clone()]);

        let loaded = store.load(&meta.id).expect("load");
        assert_eq!(loaded.paragraphs, vec!["First line.", "Second line"]);
        assert!(loaded.settings.is_none());
        assert_eq!(loaded.to_document().plain_text(), doc.plain_text());
    }

    #[test]
    fn save_with_existing_id_overwrites() {
        let (store, _dir) = store();
        let meta = store
            .save("draft", &TextDocument::from_text("v1"), None, None)
            .expect("save");
        let updated = store
            .save("final", &TextDocument::from_text("v2"), None, Some(&meta.id))
            .expect("update");

        assert_eq!(updated.id, meta.id);
        let list = store.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "final");
        assert_eq!(store.load(&meta.id).unwrap().paragraphs, vec!["v2"]);
    }

    #[test]
    fn new_ids_are_unique() {
        let (store, _dir) = store();
        let doc = TextDocument::new();
        let a = store.save("a", &doc, None, None).unwrap();
        let b = store.save("b", &doc, None, None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn settings_are_stored_with_the_document() {
        let (store, _dir) = store();
        let mut settings = AppConfig::default();
        settings.speech.rate = 1.5;
        let meta = store
            .save("with settings", &TextDocument::new(), Some(&settings), None)
            .unwrap();
        let loaded = store.load(&meta.id).unwrap();
        assert_eq!(loaded.settings.map(|s| s.speech.rate), Some(1.5));
    }

    #[test]
    fn rename_and_delete() {
        let (store, _dir) = store();
        let meta = store.save("old", &TextDocument::new(), None, None).unwrap();

        store.rename(&meta.id, "new").expect("rename");
        assert_eq!(store.list()[0].name, "new");

        store.delete(&meta.id).expect("delete");
        assert!(store.list().is_empty());
        assert!(matches!(store.load(&meta.id), Err(StoreError::NotFound(_))));
        // deleting twice is fine
        assert!(store.delete(&meta.id).is_ok());
    }

    #[test]
    fn rename_unknown_is_not_found() {
        let (store, _dir) = store();
        assert!(matches!(
            store.rename("nope", "x"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn path_like_ids_are_rejected() {
        let (store, _dir) = store();
        assert!(matches!(
            store.load("../settings"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(store.delete(""), Err(StoreError::InvalidId(_))));
    }

    #[test]
    fn corrupt_index_reads_as_empty() {
        let (store, _dir) = store();
        std::fs::write(store.dir().join(INDEX_FILE), "{ not json").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn corrupt_document_is_a_json_error() {
        let (store, _dir) = store();
        std::fs::write(store.dir().join("broken.json"), "[").unwrap();
        assert!(matches!(store.load("broken"), Err(StoreError::Json { .. })));
    }
}
