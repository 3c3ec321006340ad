use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};

/// Error type for reading and writing the todo file
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("no {0} found in this directory or any parent")]
    NotFound(String),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Walk up from `start` looking for a file called `name`.
pub fn discover_document(start: &Path, name: &str) -> Result<PathBuf, DocumentError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(DocumentError::NotFound(name.to_string()));
        }
    }
}

/// Read a whole document as text
pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replace a document's content atomically.
///
/// On failure the text that could not be written goes to the recovery log
/// beside the document before the error is returned.
pub fn save_document(path: &Path, text: &str) -> Result<(), DocumentError> {
    if let Err(e) = recovery::atomic_write(path, text.as_bytes()) {
        let dir = path.parent().unwrap_or(Path::new("."));
        recovery::log_recovery(
            dir,
            RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Write,
                description: "document write failed".to_string(),
                fields: vec![
                    ("Target".to_string(), path.display().to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: text.to_string(),
            },
        );
        return Err(DocumentError::WriteError {
            path: path.to_path_buf(),
            source: e,
        });
    }
    tracing::debug!(path = %path.display(), bytes = text.len(), "saved document");
    Ok(())
}
