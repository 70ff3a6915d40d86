//! Batch post-processing: raw completion text in, cleaned review lines out.
//!
//! Per line: marker strip → ending normalize → emoji append → placement clean.
//! Then the batch is cut to size and either stripped of emoji entirely or
//! passed through the quota & spread enforcer.

use rand::Rng;

use crate::reviews::appender::{append_context_emojis, AppendOptions};
use crate::reviews::emoji::strip_emojis;
use crate::reviews::ending::normalize_ending;
use crate::reviews::markers::strip_lead_marker;
use crate::reviews::options::GenerationOptions;
use crate::reviews::placement::clean_emoji_placement;
use crate::reviews::quota::enforce_quota_and_spread;

/// Runs the per-line stages on a single line.
pub fn clean_line<R: Rng + ?Sized>(line: &str, append: &AppendOptions, rng: &mut R) -> String {
    let line = strip_lead_marker(line);
    let line = normalize_ending(&line);
    let line = append_context_emojis(&line, append, rng);
    clean_emoji_placement(&line).trim().to_string()
}

/// Turns raw model output into at most `n` cleaned reviews, in input order.
///
/// Lines with no text left once emoji are ignored (blank or emoji-only) are dropped.
pub fn process_batch<R: Rng + ?Sized>(
    raw: &str,
    n: usize,
    options: &GenerationOptions,
    rng: &mut R,
) -> Vec<String> {
    let append = options.append_options();

    let lines: Vec<String> = raw
        .replace('\r', "")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| clean_line(line, &append, rng))
        .filter(|line| has_text(line))
        .take(n)
        .collect();

    if !options.emoji {
        return lines.iter().map(|line| strip_emojis(line)).collect();
    }

    enforce_quota_and_spread(lines, &options.spread_constraints(), rng)
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
}

fn has_text(line: &str) -> bool {
    !strip_emojis(line).is_empty()
}
