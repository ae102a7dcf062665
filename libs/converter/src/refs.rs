//! Reference token extraction
//!
//! Components link to sibling components with `→ name-N` markers
//! embedded in row text. Many tokens may appear in one row, typically
//! comma separated.

use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)→\s*([a-z][a-z0-9]*(?:-[a-z0-9]+)*-[0-9]+)")
        .expect("REFERENCE_TOKEN: hardcoded regex is valid")
});

/// Extract every `→ name-N` token, lower-cased, in text order
pub fn parse_references(text: &str) -> Vec<String> {
    REFERENCE_TOKEN
        .captures_iter(text)
        .map(|caps| caps[1].to_ascii_lowercase())
        .collect()
}

/// True when stripping all reference tokens and commas leaves only
/// whitespace
pub fn is_reference_only(text: &str) -> bool {
    let stripped = REFERENCE_TOKEN.replace_all(text, "");
    stripped.chars().all(|c| c.is_whitespace() || c == ',')
}
