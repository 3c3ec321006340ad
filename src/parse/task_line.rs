use crate::model::task::{DateToken, Priority, TaskLine, is_date_shape};

/// Length of a `YYYY-MM-DD` token
const DATE_LEN: usize = 10;

/// Tokenize one task line.
///
/// The grammar is positional and consumed left to right:
///
/// ```text
/// [x SP [DATE SP [DATE SP]]] [(P) SP] [DATE SP] body
/// ```
///
/// - `x ` marks completion; the completion date must follow it directly.
/// - A creation date right after the completion date ends the prefix; a
///   priority after that is part of the body.
/// - A priority may come first or right after the completion pair. Only an open
///   task's priority may be followed by a creation date.
///
/// Every separator is exactly one space. Nothing here fails: a token that does
/// not fit simply ends the prefix and becomes body text. Dates are recognized by
/// shape, so `2025-02-30` still occupies its position but has no calendar value.
pub fn parse_task_line(line: &str) -> TaskLine<'_> {
    let mut task = TaskLine {
        completed: false,
        completion_date: None,
        priority: None,
        priority_span: None,
        creation_date: None,
        body: line,
        completion_prefix_end: 0,
    };
    let mut pos = 0;

    if line.starts_with("x ") {
        task.completed = true;
        pos = 2;
        let Some(done) = date_at(line, pos) else {
            task.body = &line[pos..];
            return task;
        };
        pos = done.span.end + 1;
        task.completion_date = Some(done);
        task.completion_prefix_end = pos;

        if let Some(created) = date_at(line, pos) {
            pos = created.span.end + 1;
            task.creation_date = Some(created);
            task.body = &line[pos..];
            return task;
        }
    }

    if let Some(priority) = priority_at(line, pos) {
        task.priority = Some(priority);
        task.priority_span = Some(pos..pos + 4);
        pos += 4;
    }

    if !task.completed
        && let Some(created) = date_at(line, pos)
    {
        pos = created.span.end + 1;
        task.creation_date = Some(created);
    }

    task.body = &line[pos..];
    task
}

/// A date-shaped token at `pos` followed by one space
fn date_at(line: &str, pos: usize) -> Option<DateToken<'_>> {
    let end = pos + DATE_LEN;
    let text = line.get(pos..end)?;
    if is_date_shape(text) && line.as_bytes().get(end) == Some(&b' ') {
        Some(DateToken {
            text,
            span: pos..end,
        })
    } else {
        None
    }
}

/// `(X) ` at `pos`
fn priority_at(line: &str, pos: usize) -> Option<Priority> {
    match line.as_bytes().get(pos..pos + 4)? {
        [b'(', letter, b')', b' '] => Priority::from_letter(*letter as char),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_plain_task() {
        let t = parse_task_line("buy milk @store");
        assert!(!t.completed);
        assert_eq!(t.priority, None);
        assert_eq!(t.creation_date, None);
        assert_eq!(t.body, "buy milk @store");
        assert_eq!(t.completion_prefix_end, 0);
    }

    #[test]
    fn test_priority_and_creation_date() {
        let t = parse_task_line("(A) 2025-02-01 buy milk");
        assert_eq!(t.priority.map(|p| p.letter()), Some('A'));
        assert_eq!(t.priority_span, Some(0..4));
        assert_eq!(t.creation_date.unwrap().date(), Some(date("2025-02-01")));
        assert_eq!(t.body, "buy milk");
    }

    #[test]
    fn test_bare_creation_date() {
        let t = parse_task_line("2025-02-01 buy milk");
        assert_eq!(t.priority, None);
        assert_eq!(t.creation_date.unwrap().text, "2025-02-01");
        assert_eq!(t.body, "buy milk");
    }

    #[test]
    fn test_completed_with_both_dates() {
        let t = parse_task_line("x 2025-02-10 2025-02-01 buy milk");
        assert!(t.completed);
        assert_eq!(t.completion_date.unwrap().text, "2025-02-10");
        assert_eq!(t.creation_date.unwrap().text, "2025-02-01");
        assert_eq!(t.completion_prefix_end, 13);
        assert_eq!(t.body, "buy milk");
    }

    #[test]
    fn test_completed_with_priority() {
        let t = parse_task_line("x 2025-02-10 (B) call mom");
        assert!(t.completed);
        assert_eq!(t.priority.map(|p| p.letter()), Some('B'));
        assert_eq!(t.priority_span, Some(13..17));
        assert_eq!(t.body, "call mom");
    }

    #[test]
    fn test_completed_priority_then_date_is_body() {
        let t = parse_task_line("x 2025-02-10 (B) 2025-02-01 call mom");
        assert_eq!(t.priority.map(|p| p.letter()), Some('B'));
        assert_eq!(t.creation_date, None);
        assert_eq!(t.body, "2025-02-01 call mom");
    }

    #[test]
    fn test_priority_after_creation_date_is_body() {
        let t = parse_task_line("2025-02-01 (A) wrong order");
        assert_eq!(t.priority, None);
        assert_eq!(t.body, "(A) wrong order");

        let t = parse_task_line("x 2025-02-10 2025-02-01 (A) wrong order");
        assert_eq!(t.priority, None);
        assert_eq!(t.body, "(A) wrong order");
    }

    #[test]
    fn test_completion_without_date() {
        let t = parse_task_line("x (A) something");
        assert!(t.completed);
        assert_eq!(t.completion_date, None);
        assert_eq!(t.priority, None);
        assert_eq!(t.body, "(A) something");
    }

    #[test]
    fn test_invalid_date_keeps_its_position() {
        let t = parse_task_line("(A) 2025-02-30 impossible");
        let created = t.creation_date.unwrap();
        assert_eq!(created.text, "2025-02-30");
        assert_eq!(created.date(), None);
        assert_eq!(t.body, "impossible");
    }

    #[test]
    fn test_separators_are_single_spaces() {
        assert_eq!(parse_task_line("(A)  two spaces").priority.map(|p| p.letter()), Some('A'));
        assert_eq!(parse_task_line("(A)no space").priority, None);
        assert_eq!(parse_task_line("(a) lowercase").priority, None);
        assert!(!parse_task_line("X 2025-01-01 upper").completed);
        assert!(!parse_task_line("xylophone").completed);
    }

    #[test]
    fn test_trailing_date_without_space_is_not_a_field() {
        let t = parse_task_line("x 2025-02-10");
        assert!(t.completed);
        assert_eq!(t.completion_date, None);
        assert_eq!(t.body, "2025-02-10");
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let t = parse_task_line("x é 2025-01-01 ünïcode");
        assert!(t.completed);
        assert_eq!(t.completion_date, None);
        let t = parse_task_line("(É) ünïcode");
        assert_eq!(t.priority, None);
    }
}
