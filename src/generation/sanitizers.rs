//! Sanitizers for text copied from the OpenAPI document into emitted code
//!
//! Summaries and descriptions end up in `///` comments and names end up in
//! string literals, so both need normalizing before they reach a template.

use once_cell::sync::Lazy;
use regex::Regex;

static UNICODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").expect("valid regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// Normalizes Markdown prose into lines suitable for `///` doc comments.
///
/// This function:
/// - Replaces smart quotes with regular quotes and em-dashes with dashes
/// - Collapses runs of spaces and tabs, trims every line
/// - Drops leading/trailing blank lines and collapses inner blank runs to one
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::sanitizers::doc_lines;
///
/// let lines = doc_lines("Returns \u{201C}all\u{201D} pets\u{2014}paged.\n\n\n  Max 100.  ");
/// assert_eq!(lines, vec!["Returns \"all\" pets-paged.", "", "Max 100."]);
/// ```
pub fn doc_lines(input: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in input.lines() {
        let line = UNICODE_RE
            .replace_all(raw, |caps: &regex::Captures| match &caps[0] {
                "\u{2018}" | "\u{2019}" => "'",
                "\u{201C}" | "\u{201D}" => "\"",
                "\u{2014}" => "-",
                _ => "",
            })
            .to_string();
        let line = WS_RE.replace_all(line.trim(), " ").to_string();

        if line.is_empty() && lines.last().is_none_or(|last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Renders prose as `///` lines at the given indent, each ending in a newline.
///
/// Returns an empty string when there is nothing to document, so templates
/// can place the result directly in front of an item.
pub fn doc_comment(input: &str, indent: &str) -> String {
    doc_lines(input)
        .iter()
        .map(|line| {
            if line.is_empty() {
                format!("{indent}///\n")
            } else {
                format!("{indent}/// {line}\n")
            }
        })
        .collect()
}

/// Renders a string as a Rust string literal, quotes included.
///
/// # Examples
/// ```
/// use openapi_bindgen::generation::sanitizers::rust_string_literal;
///
/// assert_eq!(rust_string_literal("a\"b"), r#""a\"b""#);
/// ```
pub fn rust_string_literal(s: &str) -> String {
    format!("{s:?}")
}

/// Escapes braces so a string can be embedded in a `format!` template.
pub fn escape_format_braces(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}
