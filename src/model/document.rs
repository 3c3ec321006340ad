use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error type for line selections given on the command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid line spec '{0}' (expected N or N-M, counting from 1)")]
    Invalid(String),
    #[error("line {line} is past the end of the file ({count} lines)")]
    OutOfRange { line: usize, count: usize },
}

/// A cursor or selection reduced to the lines it touches (0-indexed, inclusive).
///
/// A bare cursor is a selection whose `first == last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSelection {
    pub first: usize,
    pub last: usize,
}

impl LineSelection {
    pub fn cursor(line: usize) -> Self {
        LineSelection {
            first: line,
            last: line,
        }
    }

    /// Build from two ends in any order
    pub fn span(a: usize, b: usize) -> Self {
        LineSelection {
            first: a.min(b),
            last: a.max(b),
        }
    }
}

/// `N` or `N-M`, 1-based as people count lines
impl FromStr for LineSelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectionError::Invalid(s.to_string());
        let one_based = |part: &str| -> Result<usize, SelectionError> {
            match part.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n - 1),
                _ => Err(invalid()),
            }
        };
        match s.split_once('-') {
            Some((a, b)) => Ok(LineSelection::span(one_based(a)?, one_based(b)?)),
            None => Ok(LineSelection::cursor(one_based(s)?)),
        }
    }
}

/// Reject selections reaching past the last line
pub fn check_in_range(
    selections: &[LineSelection],
    line_count: usize,
) -> Result<(), SelectionError> {
    match selections.iter().map(|s| s.last).max() {
        Some(last) if last >= line_count => Err(SelectionError::OutOfRange {
            line: last + 1,
            count: line_count,
        }),
        _ => Ok(()),
    }
}

/// Every line touched by any selection, each once, ascending.
/// Lines past `line_count` are dropped.
pub fn touched_lines(selections: &[LineSelection], line_count: usize) -> BTreeSet<usize> {
    selections
        .iter()
        .flat_map(|s| s.first..=s.last)
        .filter(|&l| l < line_count)
        .collect()
}

/// Replacement text for one physical line of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEdit {
    pub line: usize,
    pub text: String,
}

/// Split document text into physical lines.
///
/// Splits on `\n` only, so a trailing newline yields a final empty line and
/// `\r` stays attached to CRLF lines. `split_lines(t).join("\n") == t`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// True for empty and whitespace-only lines
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
