use std::fmt;
use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority, `A` (highest) through `Z` (lowest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Priority(char);

impl Priority {
    pub const HIGHEST: Priority = Priority('A');
    pub const LOWEST: Priority = Priority('Z');

    /// Build a priority from its letter. Only uppercase ASCII letters are valid.
    pub fn from_letter(c: char) -> Option<Priority> {
        c.is_ascii_uppercase().then_some(Priority(c))
    }

    pub fn letter(self) -> char {
        self.0
    }

    /// One step toward `A`. `None` when already at the top.
    pub fn raised(self) -> Option<Priority> {
        if self == Self::HIGHEST {
            None
        } else {
            Some(Priority((self.0 as u8 - 1) as char))
        }
    }

    /// One step toward `Z`. `None` when already at the bottom.
    pub fn lowered(self) -> Option<Priority> {
        if self == Self::LOWEST {
            None
        } else {
            Some(Priority((self.0 as u8 + 1) as char))
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

/// A `YYYY-MM-DD` token found at a grammar position.
///
/// The token is kept even when it is not a real calendar date: the grammar is
/// structural, validity only decides whether the field has a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken<'a> {
    pub text: &'a str,
    /// Byte range of the token within the parsed text
    pub span: Range<usize>,
}

impl DateToken<'_> {
    /// The calendar date, or `None` for things like `2025-02-30`
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(self.text)
    }
}

/// Parse a strict `YYYY-MM-DD` date (proleptic Gregorian).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !is_date_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `\d{4}-\d{2}-\d{2}`, nothing more
pub fn is_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// One task line split into its positional fields.
///
/// Borrowed from the line it was parsed from and never stored: every operation
/// re-parses the lines it touches. All byte offsets are relative to the text
/// handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine<'a> {
    /// Line starts with `x `
    pub completed: bool,
    /// The date right after `x `
    pub completion_date: Option<DateToken<'a>>,
    /// `(X) ` either first or right after the completion pair
    pub priority: Option<Priority>,
    /// Byte range of the `(X) ` token, including its trailing space
    pub priority_span: Option<Range<usize>>,
    pub creation_date: Option<DateToken<'a>>,
    /// Everything after the recognized prefix, tags included
    pub body: &'a str,
    /// End of the `x YYYY-MM-DD ` prefix, 0 when there is none
    pub completion_prefix_end: usize,
}

impl TaskLine<'_> {
    /// Where a new priority token belongs
    pub fn priority_insert_at(&self) -> usize {
        self.completion_prefix_end
    }
}
