use std::ops::Range;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::parse_date;
use crate::ops::notes::resolve_note_path;
use crate::parse::tags::{DUE_RE, NOTE_RE};

/// How a span of the document should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    DuePast,
    DueToday,
    DueFuture,
    NoteExists,
    NoteMissing,
}

/// A highlighted byte range of the document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub range: Range<usize>,
    pub kind: DecorationKind,
}

/// Classify every valid `due:` tag in the document against `today`.
///
/// Recomputed from scratch on every call; the range covers the whole
/// `due:YYYY-MM-DD` token.
pub fn due_decorations(text: &str, today: NaiveDate) -> Vec<Decoration> {
    DUE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let due = parse_date(&caps[1])?;
            let kind = if due < today {
                DecorationKind::DuePast
            } else if due == today {
                DecorationKind::DueToday
            } else {
                DecorationKind::DueFuture
            };
            Some(Decoration {
                range: whole.range(),
                kind,
            })
        })
        .collect()
}

/// Mark every `note:` reference by whether its file exists under `base_dir`.
pub fn note_decorations(text: &str, base_dir: &Path) -> Vec<Decoration> {
    NOTE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = if resolve_note_path(base_dir, &caps[1]).exists() {
                DecorationKind::NoteExists
            } else {
                DecorationKind::NoteMissing
            };
            Some(Decoration {
                range: whole.range(),
                kind,
            })
        })
        .collect()
}

/// Due and note decorations together, ordered by position
pub fn compute_decorations(text: &str, today: NaiveDate, base_dir: &Path) -> Vec<Decoration> {
    let mut all = due_decorations(text, today);
    all.extend(note_decorations(text, base_dir));
    all.sort_by_key(|d| d.range.start);
    all
}
