use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::ops::Range;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::parse::tags::NOTE_RE;

/// A `note:PATH` reference on a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRef {
    /// Path as written after `note:`
    pub name: String,
    /// Byte range of the whole `note:PATH` token within the line
    #[serde(skip)]
    pub span: Range<usize>,
}

/// The first note reference on `line`
pub fn first_note(line: &str) -> Option<NoteRef> {
    NOTE_RE.captures(line).map(|caps| NoteRef {
        name: caps[1].to_string(),
        span: caps.get(0).map_or(0..0, |m| m.range()),
    })
}

/// The first note reference on `line`, but only if byte `column` lies on it
pub fn note_at(line: &str, column: usize) -> Option<NoteRef> {
    first_note(line).filter(|note| note.span.start <= column && column <= note.span.end)
}

/// Resolve a note path against the todo file's directory.
///
/// Normalization is lexical: `.` is dropped and `..` pops a preceding normal
/// component. Absolute note paths replace the base.
pub fn resolve_note_path(base_dir: &Path, note: &str) -> PathBuf {
    normalize(&base_dir.join(note))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// First `max_lines` lines of a note, terminators stripped.
/// `None` for an empty file.
pub fn read_note_preview(path: &Path, max_lines: usize) -> io::Result<Option<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for line in reader.lines().take(max_lines) {
        let line = line?;
        lines.push(line.trim_end_matches('\r').to_string());
    }
    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines.join("\n")))
    }
}

/// Make sure the note file exists, creating parent directories and an empty
/// file as needed. Returns true if the file was created.
pub fn open_or_create_note(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    File::create(path)?;
    tracing::info!(path = %path.display(), "created note file");
    Ok(true)
}
