use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::document::{is_blank, split_lines};
use crate::parse::{
    extract_context, extract_creation_date, extract_due_date, extract_priority, extract_project,
    is_completed,
};

/// What a document can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Priority,
    Due,
    Created,
    Context,
    Project,
    Status,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Priority,
        SortField::Due,
        SortField::Created,
        SortField::Context,
        SortField::Project,
        SortField::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortField::Priority => "priority",
            SortField::Due => "due",
            SortField::Created => "created",
            SortField::Context => "context",
            SortField::Project => "project",
            SortField::Status => "status",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown sort field: {}", s))
    }
}

/// An optional key that orders after every present value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsentLast<T>(pub Option<T>);

impl<T: Ord> PartialOrd for AbsentLast<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for AbsentLast<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Stable sort of `lines` by `key`.
///
/// Blank lines are dropped from the output. The key sees each line with
/// surrounding whitespace stripped; the returned lines are the originals,
/// untouched. Equal keys keep their original relative order.
pub fn sort_lines<K, F>(lines: &[&str], key: F) -> Vec<String>
where
    K: Ord,
    F: Fn(&str) -> K,
{
    let mut keyed: Vec<(K, usize, &str)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_blank(line))
        .map(|(i, line)| (key(line.trim()), i, *line))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, _, line)| line.to_string()).collect()
}

/// Sort a whole document by one field and return the new text.
///
/// Key placement:
/// - priority, due and creation date: absent values sort last
/// - context and project: compared case-insensitively, absent sorts first
/// - status: incomplete before completed
pub fn sort_document(text: &str, field: SortField) -> String {
    let lines = split_lines(text);
    let sorted = match field {
        SortField::Priority => sort_lines(&lines, |l| AbsentLast(extract_priority(l))),
        SortField::Due => sort_lines(&lines, |l| AbsentLast(extract_due_date(l))),
        SortField::Created => sort_lines(&lines, |l| AbsentLast(extract_creation_date(l))),
        SortField::Context => sort_lines(&lines, |l| {
            extract_context(l).unwrap_or_default().to_lowercase()
        }),
        SortField::Project => sort_lines(&lines, |l| {
            extract_project(l).unwrap_or_default().to_lowercase()
        }),
        SortField::Status => sort_lines(&lines, is_completed),
    };
    tracing::debug!(field = %field, lines = sorted.len(), "sorted document");
    sorted.join("\n")
}
