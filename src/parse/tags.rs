use std::sync::LazyLock;

use regex::Regex;

/// `due:YYYY-MM-DD` anywhere in a line
pub static DUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdue:(\d{4}-\d{2}-\d{2})\b").expect("valid due regex"));

/// `note:PATH` anywhere in a line
pub static NOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnote:(\S+)").expect("valid note regex"));

/// `@context`, only when preceded by whitespace
pub static CONTEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s@(\S+)").expect("valid context regex"));

/// `+project`, only when preceded by whitespace
pub static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\+(\S+)").expect("valid project regex"));
