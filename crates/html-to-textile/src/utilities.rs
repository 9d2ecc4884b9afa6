//! Utility functions and constants for HTML source handling.

use once_cell::sync::Lazy;
use regex::Regex;

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

static LINE_ENDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").expect("valid regex"));
static INDENTED_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n +").expect("valid regex"));
static NEWLINE_AFTER_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s*\n").expect("valid regex"));

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Collapse the indentation of HTML source so it does not leak into text.
///
/// Line endings become `\n`, a newline followed by spaces becomes a single
/// newline, and whitespace running from a `>` up to a newline becomes a
/// single space.
pub fn normalize_source(html: &str) -> String {
    let unix = LINE_ENDING.replace_all(html, "\n");
    let dedented = INDENTED_NEWLINE.replace_all(&unix, "\n");
    NEWLINE_AFTER_TAG.replace_all(&dedented, "> ").into_owned()
}
