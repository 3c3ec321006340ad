//! Single-field extractors.
//!
//! Each one reads a single line and answers one question about it. None of
//! them fail: a missing or malformed field is `None`.

use chrono::NaiveDate;

use crate::model::task::{Priority, parse_date};
use crate::parse::tags::{CONTEXT_RE, DUE_RE, NOTE_RE, PROJECT_RE};
use crate::parse::task_line::parse_task_line;

/// The line, ignoring leading whitespace, starts with `x `
pub fn is_completed(line: &str) -> bool {
    line.trim_start().starts_with("x ")
}

/// `(X) ` at the start of the line or right after `x YYYY-MM-DD `
pub fn extract_priority(line: &str) -> Option<Priority> {
    parse_task_line(line).priority
}

/// Creation date at its grammar position, if it is a real date.
///
/// Only the first date-shaped token at a creation-date position counts: an
/// invalid one there means "no creation date", not "keep looking".
pub fn extract_creation_date(line: &str) -> Option<NaiveDate> {
    parse_task_line(line).creation_date?.date()
}

/// First `due:` tag holding a date-shaped value; `None` if that value is not a
/// real date.
pub fn extract_due_date(line: &str) -> Option<NaiveDate> {
    let caps = DUE_RE.captures(line)?;
    parse_date(&caps[1])
}

/// First `@context` token, without the `@`
pub fn extract_context(line: &str) -> Option<&str> {
    CONTEXT_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// First `+project` token, without the `+`
pub fn extract_project(line: &str) -> Option<&str> {
    PROJECT_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// First `note:` path on the line
pub fn extract_note(line: &str) -> Option<&str> {
    NOTE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_is_completed() {
        assert!(is_completed("x 2025-01-01 done thing"));
        assert!(is_completed("x done without date"));
        assert!(is_completed("   x indented"));
        assert!(!is_completed("X 2025-01-01 uppercase"));
        assert!(!is_completed("x"));
        assert!(!is_completed("xylophone lessons"));
        assert!(!is_completed(""));
    }

    #[test]
    fn test_extract_priority() {
        assert_eq!(extract_priority("(A) call mom").map(|p| p.letter()), Some('A'));
        assert_eq!(
            extract_priority("x 2025-01-01 (C) call mom").map(|p| p.letter()),
            Some('C')
        );
        assert_eq!(extract_priority("call mom (A) later"), None);
        assert_eq!(extract_priority("2025-01-01 (A) wrong order"), None);
        assert_eq!(extract_priority("(AA) two letters"), None);
    }

    #[test]
    fn test_extract_creation_date() {
        assert_eq!(
            extract_creation_date("x 2025-02-10 2025-02-01 buy milk"),
            Some(date("2025-02-01"))
        );
        assert_eq!(
            extract_creation_date("(A) 2025-02-01 buy milk"),
            Some(date("2025-02-01"))
        );
        assert_eq!(
            extract_creation_date("2025-02-01 buy milk"),
            Some(date("2025-02-01"))
        );
        assert_eq!(extract_creation_date("buy milk"), None);
    }

    #[test]
    fn test_extract_creation_date_invalid_stops_search() {
        assert_eq!(extract_creation_date("2025-02-32 bad day"), None);
        assert_eq!(extract_creation_date("x 2025-02-10 2025-13-01 bad month"), None);
        // The completion date alone is never a creation date
        assert_eq!(extract_creation_date("x 2025-02-10 buy milk"), None);
        // Nor is a date after the priority of a completed task
        assert_eq!(extract_creation_date("x 2025-02-10 (B) 2025-02-01 call mom"), None);
    }

    #[test]
    fn test_extract_due_date() {
        assert_eq!(
            extract_due_date("pay rent due:2025-03-01 +home"),
            Some(date("2025-03-01"))
        );
        assert_eq!(extract_due_date("pay rent due:2025-02-30"), None);
        assert_eq!(extract_due_date("pay rent overdue:2025-03-01"), None);
        assert_eq!(extract_due_date("pay rent due:2025-03-011"), None);
        assert_eq!(extract_due_date("pay rent"), None);
        // First tag wins, even when a later one is valid
        assert_eq!(
            extract_due_date("a due:2025-03-01 due:2024-01-01"),
            Some(date("2025-03-01"))
        );
    }

    #[test]
    fn test_extract_context_and_project() {
        let line = "(A) call mom @phone @home +family +weekly";
        assert_eq!(extract_context(line), Some("phone"));
        assert_eq!(extract_project(line), Some("family"));

        assert_eq!(extract_context("email me@example.com"), None);
        assert_eq!(extract_project("compute 1+2"), None);
        // Tag must be preceded by whitespace, so a leading tag does not count
        assert_eq!(extract_context("@home first"), None);
        // Values are case-sensitive
        assert_eq!(extract_context("task @Home"), Some("Home"));
    }

    #[test]
    fn test_extract_note() {
        assert_eq!(
            extract_note("write report note:notes/report.md +work"),
            Some("notes/report.md")
        );
        assert_eq!(extract_note("footnote:x is not a note"), None);
        assert_eq!(extract_note("nothing here"), None);
    }
}
