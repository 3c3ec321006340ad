use serde::Serialize;

use crate::ops::decorate::{Decoration, DecorationKind};
use crate::ops::mutate::LineMutation;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HighlightJson {
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub kind: DecorationKind,
}

#[derive(Serialize)]
pub struct NoteJson {
    pub note: String,
    pub path: String,
    pub exists: bool,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Result of a write command
#[derive(Serialize)]
pub struct StatusJson {
    pub message: String,
    /// Tasks sorted or relocated, or lines changed
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Serialize)]
pub struct TagsJson {
    pub trigger: char,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// 1-based line and column of a byte offset in `text`
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

pub fn highlight_to_json(text: &str, decoration: &Decoration) -> HighlightJson {
    let (line, column) = line_and_column(text, decoration.range.start);
    HighlightJson {
        line,
        column,
        text: text[decoration.range.clone()].to_string(),
        kind: decoration.kind,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

pub fn kind_label(kind: DecorationKind) -> &'static str {
    match kind {
        DecorationKind::DuePast => "overdue",
        DecorationKind::DueToday => "due today",
        DecorationKind::DueFuture => "upcoming",
        DecorationKind::NoteExists => "note",
        DecorationKind::NoteMissing => "missing note",
    }
}

/// `  3:12  due:2025-03-01  overdue`
pub fn format_highlight(text: &str, decoration: &Decoration) -> String {
    let (line, column) = line_and_column(text, decoration.range.start);
    format!(
        "{:>4}:{:<3} {}  {}",
        line,
        column,
        &text[decoration.range.clone()],
        kind_label(decoration.kind)
    )
}

/// `Updated 1 line`, `Updated 3 lines`
pub fn format_updated(count: usize) -> String {
    format!("Updated {} {}", count, if count == 1 { "line" } else { "lines" })
}

/// Parse a priority action into a line mutation
pub fn parse_priority_action(s: &str) -> Result<LineMutation, String> {
    match s {
        "up" => Ok(LineMutation::RaisePriority),
        "down" => Ok(LineMutation::LowerPriority),
        "rm" => Ok(LineMutation::RemovePriority),
        _ => Err(format!(
            "unknown priority action '{}' (expected: up, down, rm)",
            s
        )),
    }
}

/// Parse a tag trigger, `@` or `+`
pub fn parse_trigger(s: &str) -> Result<char, String> {
    match s {
        "@" => Ok('@'),
        "+" => Ok('+'),
        _ => Err(format!("unknown tag trigger '{}' (expected: @ or +)", s)),
    }
}
