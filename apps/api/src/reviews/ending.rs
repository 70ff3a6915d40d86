//! Sentence-ending normalization.
//!
//! Generated reviews often end with garbled or stacked Korean enders
//! (`좋았어요 요 요`, `했습니다다`), trailing chatter after an emoji, or long
//! exclamation runs. Every rule here only ever shortens the line.

use std::sync::LazyLock;

use regex::Regex;

use crate::reviews::emoji::{join, segments};

/// Accepted terminal particles, checked in this order.
const TERMINALS: &[&str] = &["요", "다", "음", "습니다", "어요"];

/// `<terminal>` followed by one or more stray `요`.
static CLOSER_RUN_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    TERMINALS
        .iter()
        .map(|&t| {
            let re = Regex::new(&format!(r"{t}(?:\s*요)+$")).expect("valid regex");
            (re, t)
        })
        .collect()
});

/// `<terminal>` repeated: `다 다`, `음음`, `습니다 습니다`.
static REPEATED_TERMINAL_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    TERMINALS
        .iter()
        .map(|&t| {
            let re = Regex::new(&format!(r"{t}(?:\s*{t})+$")).expect("valid regex");
            (re, t)
        })
        .collect()
});

static EXCLAMATION_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!{4,}$").expect("valid regex"));

static TERMINAL_PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(습니다|어요|다|음)\.\s*$").expect("valid regex"));

/// Normalizes a line's ending. Idempotent: the rule pass is repeated until the
/// line stops changing.
pub fn normalize_ending(line: &str) -> String {
    let mut current = line.trim().to_string();
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(line: &str) -> String {
    let mut out = line.to_string();

    for (re, terminal) in CLOSER_RUN_RULES.iter().chain(REPEATED_TERMINAL_RULES.iter()) {
        out = re.replace(&out, *terminal).into_owned();
    }

    out = truncate_after_first_glyph(&out);
    out = EXCLAMATION_RUN_RE.replace(&out, "!!!").into_owned();
    out = TERMINAL_PERIOD_RE.replace(&out, "${1}").into_owned();

    out.trim().to_string()
}

/// Anything following the first emoji is treated as noise and dropped.
fn truncate_after_first_glyph(line: &str) -> String {
    let segs = segments(line);
    match segs.iter().position(|s| s.is_glyph()) {
        Some(i) if i + 1 < segs.len() => join(&segs[..=i]),
        _ => line.to_string(),
    }
}
