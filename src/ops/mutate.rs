use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::document::{LineEdit, LineSelection, split_lines, touched_lines};
use crate::model::task::Priority;
use crate::parse::{is_completed, parse_task_line};

/// Leading indentation, `x `, and an optional completion date with its space
static COMPLETION_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)x (?:\d{4}-\d{2}-\d{2} )?").expect("valid completion prefix regex")
});

/// A line-local rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMutation {
    ToggleCompletion,
    RemovePriority,
    RaisePriority,
    LowerPriority,
}

impl LineMutation {
    pub fn apply(self, line: &str, today: NaiveDate) -> String {
        match self {
            LineMutation::ToggleCompletion => toggle_completion(line, today),
            LineMutation::RemovePriority => remove_priority(line),
            LineMutation::RaisePriority => raise_priority(line),
            LineMutation::LowerPriority => lower_priority(line),
        }
    }
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Complete or reopen one line.
///
/// Reopening removes `x `, the completion date if present, and the single
/// space after each, keeping any indentation. Completing prepends
/// `x YYYY-MM-DD ` at column 0.
pub fn toggle_completion(line: &str, today: NaiveDate) -> String {
    if is_completed(line) {
        COMPLETION_PREFIX_RE.replace(line, "$1").into_owned()
    } else {
        format!("x {} {}", today.format("%Y-%m-%d"), line)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Drop the `(X) ` token. No-op without one.
pub fn remove_priority(line: &str) -> String {
    let indent = indent_len(line);
    let task = parse_task_line(&line[indent..]);
    match task.priority_span {
        Some(span) => format!(
            "{}{}",
            &line[..indent + span.start],
            &line[indent + span.end..]
        ),
        None => line.to_string(),
    }
}

/// One step toward `A`; inserts `(A) ` when there is no priority yet.
///
/// A completed line without a completion date has no place for a priority
/// and is left unchanged.
pub fn raise_priority(line: &str) -> String {
    let indent = indent_len(line);
    let task = parse_task_line(&line[indent..]);
    match (task.priority, &task.priority_span) {
        (Some(current), Some(span)) => match current.raised() {
            Some(next) => replace_letter(line, indent + span.start, next),
            None => line.to_string(),
        },
        _ if task.completed && task.completion_date.is_none() => line.to_string(),
        _ => {
            let at = indent + task.priority_insert_at();
            format!("{}{} {}", &line[..at], Priority::HIGHEST, &line[at..])
        }
    }
}

/// One step toward `Z`; removes the token once past `Z`. No-op without one.
pub fn lower_priority(line: &str) -> String {
    let indent = indent_len(line);
    let task = parse_task_line(&line[indent..]);
    match (task.priority, &task.priority_span) {
        (Some(current), Some(span)) => match current.lowered() {
            Some(next) => replace_letter(line, indent + span.start, next),
            None => remove_priority(line),
        },
        _ => line.to_string(),
    }
}

/// Rewrite the `(X) ` token starting at `token_start`
fn replace_letter(line: &str, token_start: usize, priority: Priority) -> String {
    format!(
        "{}{}{}",
        &line[..token_start],
        priority,
        &line[token_start + 3..]
    )
}

fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

// ---------------------------------------------------------------------------
// Document-level application
// ---------------------------------------------------------------------------

/// Compute the edits `mutation` makes to every line touched by `selections`.
///
/// Edits are computed from the unmodified text and returned last line first,
/// one per line even when selections overlap. Lines the mutation leaves
/// unchanged produce no edit.
pub fn plan_edits(
    text: &str,
    selections: &[LineSelection],
    mutation: LineMutation,
    today: NaiveDate,
) -> Vec<LineEdit> {
    let lines = split_lines(text);
    touched_lines(selections, lines.len())
        .into_iter()
        .rev()
        .filter_map(|idx| {
            let before = lines[idx];
            let after = mutation.apply(before, today);
            (after != before).then_some(LineEdit {
                line: idx,
                text: after,
            })
        })
        .collect()
}

/// Apply line replacements to document text.
pub fn apply_edits(text: &str, edits: &[LineEdit]) -> String {
    let mut lines: Vec<String> = split_lines(text).into_iter().map(String::from).collect();
    for edit in edits {
        if let Some(slot) = lines.get_mut(edit.line) {
            slot.clone_from(&edit.text);
        }
    }
    lines.join("\n")
}

/// Plan and apply in one step. Returns the new text and the number of lines changed.
pub fn mutate_document(
    text: &str,
    selections: &[LineSelection],
    mutation: LineMutation,
    today: NaiveDate,
) -> (String, usize) {
    let edits = plan_edits(text, selections, mutation, today);
    tracing::debug!(?mutation, changed = edits.len(), "mutated lines");
    (apply_edits(text, &edits), edits.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    // -- completion --

    #[test]
    fn test_complete_line() {
        assert_eq!(
            toggle_completion("(A) call mom", today()),
            "x 2025-03-14 (A) call mom"
        );
    }

    #[test]
    fn test_complete_indented_line_inserts_at_column_zero() {
        assert_eq!(
            toggle_completion("  call mom", today()),
            "x 2025-03-14   call mom"
        );
    }

    #[test]
    fn test_reopen_line() {
        assert_eq!(toggle_completion("x 2025-01-01 call mom", today()), "call mom");
        assert_eq!(toggle_completion("x call mom", today()), "call mom");
        assert_eq!(toggle_completion("  x 2025-01-01 call mom", today()), "  call mom");
        assert_eq!(
            toggle_completion("x 2025-01-01 2024-12-01 call mom", today()),
            "2024-12-01 call mom"
        );
    }

    #[test]
    fn test_toggle_round_trip() {
        for line in [
            "call mom",
            "(B) 2025-01-01 call mom @phone",
            "  indented",
            "",
            "2024-12-01 dated",
        ] {
            let done = toggle_completion(line, today());
            assert!(is_completed(&done));
            assert_eq!(toggle_completion(&done, today()), line);
        }
    }

    // -- priority --

    #[test]
    fn test_remove_priority() {
        assert_eq!(remove_priority("(A) call mom"), "call mom");
        assert_eq!(
            remove_priority("x 2025-01-01 (C) call mom"),
            "x 2025-01-01 call mom"
        );
        assert_eq!(remove_priority("  (B) indented"), "  indented");
        assert_eq!(remove_priority("call mom"), "call mom");
        assert_eq!(remove_priority("2025-01-01 (A) wrong order"), "2025-01-01 (A) wrong order");
    }

    #[test]
    fn test_raise_priority() {
        assert_eq!(raise_priority("(C) call mom"), "(B) call mom");
        assert_eq!(raise_priority("(A) call mom"), "(A) call mom");
        assert_eq!(raise_priority("call mom"), "(A) call mom");
        assert_eq!(
            raise_priority("x 2025-01-01 call mom"),
            "x 2025-01-01 (A) call mom"
        );
        assert_eq!(
            raise_priority("x 2025-01-01 (Z) call mom"),
            "x 2025-01-01 (Y) call mom"
        );
        assert_eq!(raise_priority("  call mom"), "  (A) call mom");
    }

    #[test]
    fn test_raise_priority_keeps_undated_completion() {
        let line = "x call mom";
        assert_eq!(raise_priority(line), line);
        assert!(is_completed(&raise_priority(line)));
        assert_eq!(raise_priority("  x call mom"), "  x call mom");
        assert_eq!(lower_priority(&raise_priority(line)), line);
    }

    #[test]
    fn test_lower_priority() {
        assert_eq!(lower_priority("(A) call mom"), "(B) call mom");
        assert_eq!(lower_priority("(Z) call mom"), "call mom");
        assert_eq!(lower_priority("call mom"), "call mom");
        assert_eq!(
            lower_priority("x 2025-01-01 (Z) call mom"),
            "x 2025-01-01 call mom"
        );
    }

    #[test]
    fn test_priority_round_trips() {
        let b = "(B) 2025-01-01 call mom";
        assert_eq!(lower_priority(&raise_priority(b)), b);

        let a = "(A) call mom";
        assert_eq!(raise_priority(a), a);

        let none = "call mom";
        assert_eq!(remove_priority(&raise_priority(none)), none);
    }

    #[test]
    fn test_priority_keeps_creation_date() {
        assert_eq!(
            raise_priority("2025-01-01 call mom"),
            "(A) 2025-01-01 call mom"
        );
    }

    // -- documents --

    #[test]
    fn test_plan_edits_last_to_first_and_deduplicated() {
        let text = "a\nb\nc\nd";
        let selections = [
            LineSelection::span(0, 1),
            LineSelection::cursor(1),
            LineSelection::cursor(3),
        ];
        let edits = plan_edits(text, &selections, LineMutation::RaisePriority, today());
        let lines: Vec<usize> = edits.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 1, 0]);
        assert_eq!(edits[1].text, "(A) b");
    }

    #[test]
    fn test_plan_edits_skips_unchanged_and_out_of_range() {
        let text = "(A) top\nplain";
        let edits = plan_edits(
            text,
            &[LineSelection::span(0, 5)],
            LineMutation::RaisePriority,
            today(),
        );
        assert_eq!(
            edits,
            vec![LineEdit {
                line: 1,
                text: "(A) plain".to_string()
            }]
        );
    }

    #[test]
    fn test_mutate_document_toggle_mixed_selection() {
        let text = "x 2025-01-01 done\nopen\nuntouched\n";
        let (out, changed) = mutate_document(
            text,
            &[LineSelection::span(0, 1)],
            LineMutation::ToggleCompletion,
            today(),
        );
        assert_eq!(changed, 2);
        assert_eq!(out, "done\nx 2025-03-14 open\nuntouched\n");
    }

    #[test]
    fn test_apply_edits_preserves_other_lines() {
        let text = "one\r\ntwo\r\nthree";
        let edits = vec![LineEdit {
            line: 1,
            text: "TWO\r".to_string(),
        }];
        assert_eq!(apply_edits(text, &edits), "one\r\nTWO\r\nthree");
    }
}
