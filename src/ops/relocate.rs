use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::sibling::append_lines;
use crate::model::config::FilesConfig;
use crate::model::document::{LineSelection, is_blank, split_lines, touched_lines};
use crate::parse::is_completed;

/// Error type for archive and move operations.
///
/// Each variant aborts the operation before the source document changes.
#[derive(Debug, thiserror::Error)]
pub enum RelocateError {
    #[error("please save the file first")]
    MissingPath,
    #[error("no completed tasks to archive")]
    NothingToArchive,
    #[error("no tasks selected to move to {0}")]
    NothingSelected(String),
    #[error("cannot move tasks from {0} into itself")]
    SameFile(String),
    #[error("error writing to {file} - {source}")]
    Write {
        file: String,
        source: std::io::Error,
    },
}

/// A sibling file that selected lines can be moved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Someday,
    Waiting,
    Todo,
}

impl Destination {
    pub fn file_name(self, files: &FilesConfig) -> &str {
        match self {
            Destination::Someday => &files.someday,
            Destination::Waiting => &files.waiting,
            Destination::Todo => &files.todo,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Someday => write!(f, "someday"),
            Destination::Waiting => write!(f, "waiting"),
            Destination::Todo => write!(f, "todo"),
        }
    }
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "someday" => Ok(Destination::Someday),
            "waiting" => Ok(Destination::Waiting),
            "todo" => Ok(Destination::Todo),
            _ => Err(format!("unknown destination: {}", s)),
        }
    }
}

/// What to relocate and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// Every completed line goes to the done file
    Archive,
    /// Every non-blank selected line goes to the destination file
    Move {
        destination: Destination,
        selections: Vec<LineSelection>,
    },
}

/// A document split into the lines leaving it and the text that stays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub moved: Vec<String>,
    pub remaining: String,
}

/// Completed lines move verbatim; all other lines, blank ones included, stay
/// in order.
pub fn partition_completed(text: &str) -> Partition {
    let mut moved = Vec::new();
    let mut remaining = Vec::new();
    for line in split_lines(text) {
        if is_completed(line) {
            moved.push(line.to_string());
        } else {
            remaining.push(line);
        }
    }
    Partition {
        moved,
        remaining: remaining.join("\n"),
    }
}

/// Non-blank selected lines move with surrounding whitespace stripped. Their
/// whole physical lines leave the document, so no blank line is left behind.
/// Selected blank lines stay.
pub fn partition_selected(text: &str, selections: &[LineSelection]) -> Partition {
    let lines = split_lines(text);
    let touched = touched_lines(selections, lines.len());
    let mut moved = Vec::new();
    let mut remaining = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        if touched.contains(&idx) && !is_blank(line) {
            moved.push(line.trim().to_string());
        } else {
            remaining.push(line);
        }
    }
    Partition {
        moved,
        remaining: remaining.join("\n"),
    }
}

/// Result of a successful relocation. The host replaces the source document
/// with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateOutcome {
    pub target: PathBuf,
    pub moved: Vec<String>,
    pub text: String,
    pub message: String,
}

/// Move lines out of a document into a sibling file.
///
/// Steps, each of which can stop the operation:
/// 1. the document must have a backing file
/// 2. the partition must select at least one line
/// 3. the append to the sibling file must succeed
///
/// The sibling file is written here; the source document is not. On success
/// the caller replaces it with `outcome.text`. On any error nothing was written.
pub fn relocate(
    source: Option<&Path>,
    text: &str,
    relocation: &Relocation,
    files: &FilesConfig,
) -> Result<RelocateOutcome, RelocateError> {
    let source = source.ok_or(RelocateError::MissingPath)?;
    let dir = source.parent().unwrap_or(Path::new("."));

    let (partition, file_name, verb) = match relocation {
        Relocation::Archive => (partition_completed(text), files.done.as_str(), "Archived"),
        Relocation::Move {
            destination,
            selections,
        } => (
            partition_selected(text, selections),
            destination.file_name(files),
            "Moved",
        ),
    };

    if partition.moved.is_empty() {
        return Err(match relocation {
            Relocation::Archive => RelocateError::NothingToArchive,
            Relocation::Move { .. } => RelocateError::NothingSelected(file_name.to_string()),
        });
    }

    let target = dir.join(file_name);
    if is_same_file(source, &target) {
        return Err(RelocateError::SameFile(file_name.to_string()));
    }

    append_lines(&target, &partition.moved).map_err(|e| RelocateError::Write {
        file: file_name.to_string(),
        source: e,
    })?;

    let count = partition.moved.len();
    tracing::info!(
        target = %target.display(),
        count,
        "relocated tasks"
    );
    Ok(RelocateOutcome {
        target,
        message: format!("{} {} to {}", verb, task_count(count), file_name),
        moved: partition.moved,
        text: partition.remaining,
    })
}

/// `1 task`, `3 tasks`
pub fn task_count(n: usize) -> String {
    format!("{} {}", n, if n == 1 { "task" } else { "tasks" })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.file_name() == b.file_name() && a.parent() == b.parent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_completed() {
        let p = partition_completed("x 2025-01-01 task1\ntask2 @home");
        assert_eq!(p.moved, vec!["x 2025-01-01 task1"]);
        assert_eq!(p.remaining, "task2 @home");
    }

    #[test]
    fn test_partition_completed_keeps_blank_lines() {
        let p = partition_completed("a\n\nx 2025-01-01 b\n  x indented\nc\n");
        assert_eq!(p.moved, vec!["x 2025-01-01 b", "  x indented"]);
        assert_eq!(p.remaining, "a\n\nc\n");
    }

    #[test]
    fn test_partition_completed_nothing_done() {
        let p = partition_completed("a\nb");
        assert!(p.moved.is_empty());
        assert_eq!(p.remaining, "a\nb");
    }

    #[test]
    fn test_partition_selected_strips_and_removes_whole_lines() {
        let text = "one\n  two  \n\nfour\nfive";
        let p = partition_selected(text, &[LineSelection::span(1, 3)]);
        assert_eq!(p.moved, vec!["two", "four"]);
        assert_eq!(p.remaining, "one\n\nfive");
    }

    #[test]
    fn test_partition_selected_last_line_leaves_no_artifact() {
        let p = partition_selected("a\nb\nc", &[LineSelection::cursor(2)]);
        assert_eq!(p.remaining, "a\nb");

        let p = partition_selected("a\nb\nc\n", &[LineSelection::cursor(2)]);
        assert_eq!(p.remaining, "a\nb\n");
    }

    #[test]
    fn test_partition_selected_blank_only() {
        let p = partition_selected("a\n\nb", &[LineSelection::cursor(1)]);
        assert!(p.moved.is_empty());
        assert_eq!(p.remaining, "a\n\nb");
    }

    #[test]
    fn test_relocate_without_path() {
        let err = relocate(
            None,
            "x 2025-01-01 a",
            &Relocation::Archive,
            &FilesConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RelocateError::MissingPath));
    }

    #[test]
    fn test_task_count() {
        assert_eq!(task_count(1), "1 task");
        assert_eq!(task_count(0), "0 tasks");
        assert_eq!(task_count(2), "2 tasks");
    }

    #[test]
    fn test_destination_from_str() {
        assert_eq!("waiting".parse::<Destination>(), Ok(Destination::Waiting));
        assert!("later".parse::<Destination>().is_err());
    }
}
