//! Text Helpers
//!
//! Escaping for host-supplied text and `@mention` extraction.

use regex::Regex;
use std::sync::OnceLock;

/// Usernames are lowercase letters, digits, dashes, and underscores, and must
/// start with a letter or digit.
fn mention_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"@[a-z0-9][a-z0-9_\-]*").ok())
        .as_ref()
}

/// Escape `&`, `<`, `>`, `[`, and `]` in one pass.
///
/// Equivalent to replacing them in that order without re-scanning, so the
/// `&` of an inserted entity is never escaped again.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '[' => out.push_str("\\["),
            ']' => out.push_str("\\]"),
            other => out.push(other),
        }
    }
    out
}

/// Distinct mentioned usernames without the `@`, in first-seen order.
pub fn extract_usernames(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let Some(pattern) = mention_pattern() else {
        return names;
    };
    for m in pattern.find_iter(text) {
        let name = &m.as_str()[1..];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// `"\nTo: alice, bob"` for a text that mentions anyone, otherwise `None`.
pub fn mentions(text: &str) -> Option<String> {
    let names = extract_usernames(text);
    if names.is_empty() {
        None
    } else {
        Some(format!("\nTo: {}", names.join(", ")))
    }
}
