//! Leading list-marker removal for model-generated candidate lines.

use std::sync::LazyLock;

use regex::Regex;

/// Ordinal (`1.`, `2)`, `3-`), bullet glyph, or circled digit at line start.
static LEAD_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+\s*[.\-)]|[-*•·∙‣◦●]|[①-⑨]|[❶-❾])\s*").expect("valid regex")
});

/// A closing bracket left standing alone at line start (`) 좋았어요`).
static LEAD_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[)\]]\s+").expect("valid regex"));

/// Removes at most one leading enumeration or bullet marker, then a stray
/// closing bracket, and trims. Lines without a marker pass through trimmed.
pub fn strip_lead_marker(line: &str) -> String {
    let line = LEAD_MARKER_RE.replace(line.trim(), "");
    LEAD_BRACKET_RE.replace(&line, "").trim().to_string()
}
