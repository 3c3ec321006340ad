use std::collections::BTreeSet;

use crate::parse::tags::{CONTEXT_RE, PROJECT_RE};

/// Completion candidates for a tag trigger character.
///
/// `@` offers every context in the document and `+` every project, each with
/// its sigil, deduplicated and sorted. Other triggers offer nothing.
pub fn complete_tags(text: &str, trigger: char) -> Vec<String> {
    let re = match trigger {
        '@' => &*CONTEXT_RE,
        '+' => &*PROJECT_RE,
        _ => return Vec::new(),
    };
    re.find_iter(text)
        .map(|m| m.as_str().trim_start().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
