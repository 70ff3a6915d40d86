//! Trailing emoji decoration for a single review line.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::reviews::context_emoji::{pick_context_emojis, MAX_CONTEXT_EMOJIS};
use crate::reviews::emoji::ends_with_emoji;

/// Pleasant, content-neutral glyphs used when no keyword matched.
pub const FALLBACK_EMOJIS: &[&str] = &["🙂", "😊", "👍", "🙌", "✨", "😋", "🫶", "👌"];

pub const DEFAULT_FALLBACK_PROBABILITY: f64 = 0.35;

static TRAILING_PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppendOptions {
    pub enable: bool,
    /// Chance of a generic emoji when the content matched nothing.
    pub fallback_probability: f64,
}

impl Default for AppendOptions {
    fn default() -> Self {
        Self {
            enable: true,
            fallback_probability: DEFAULT_FALLBACK_PROBABILITY,
        }
    }
}

/// Appends up to two emoji to the end of `line`.
///
/// Content matches win; otherwise a generic glyph is drawn with
/// `fallback_probability`. A trailing period is removed before appending.
/// Lines that already end in an emoji, blank lines, and disabled options
/// come back unchanged (trimmed).
pub fn append_context_emojis<R: Rng + ?Sized>(
    line: &str,
    options: &AppendOptions,
    rng: &mut R,
) -> String {
    let line = line.trim();
    if !options.enable || line.is_empty() || ends_with_emoji(line) {
        return line.to_string();
    }

    let mut emojis = pick_context_emojis(line, rng);
    if emojis.is_empty() && rng.gen::<f64>() < options.fallback_probability {
        emojis.extend(FALLBACK_EMOJIS.choose(rng));
    }

    if emojis.is_empty() {
        return line.to_string();
    }

    let mut out = TRAILING_PERIOD_RE.replace(line, "").into_owned();
    for glyph in emojis.iter().take(MAX_CONTEXT_EMOJIS) {
        out.push_str(glyph);
    }
    out
}
