//! Plain-text (`.txt`) import and export.
//!
//! Each line of a text file is one paragraph.  Other formats are rejected
//! with [`StoreError::UnsupportedType`].

use std::path::Path;

use super::StoreError;
use crate::editor::TextDocument;

fn check_extension(path: &Path) -> Result<(), StoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext == "txt" {
        Ok(())
    } else {
        Err(StoreError::UnsupportedType(if ext.is_empty() {
            "(no extension)".to_string()
        } else {
            ext
        }))
    }
}

/// Read a `.txt` file as paragraphs.  A leading byte-order mark and a
/// single trailing newline are dropped.
pub fn import_txt(path: &Path) -> Result<Vec<String>, StoreError> {
    check_extension(path)?;
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let text = raw.strip_prefix('\u{FEFF}').unwrap_or(&raw);
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('\r').unwrap_or(text);

    Ok(text
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

/// Write `doc` as a `.txt` file, one paragraph per line.
pub fn export_txt(path: &Path, doc: &TextDocument) -> Result<(), StoreError> {
    check_extension(path)?;
    let mut out = doc.plain_text().to_string();
    out.push('\n');
    std::fs::write(path, out).map_err(|e| StoreError::io(path, e))
}
