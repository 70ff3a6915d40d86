//! Emoji quota & spread enforcement over a whole batch.
//!
//! Chooses which decorated lines keep their emoji so that:
//! - the kept count lands in `[floor(n·min_fraction), ceil(n·max_fraction)]`
//!   (capped by how many lines are decorated at all),
//! - no more than `max_run_length` consecutive lines are decorated,
//! - a run of two or more is followed by at least `min_gap_after_max_run` plain lines.
//!
//! Algorithm: draw a target count `t`, lay `t` evenly spaced ideal slots over
//! the batch, and for each slot greedily take the closest unused decorated
//! index that keeps the spacing rules. When every candidate breaks them, the
//! closest one is taken anyway for that slot. Any shortfall is back-filled in
//! index order with candidates that still satisfy the rules. Everything not
//! kept has its emoji stripped.
//!
//! This is a greedy approximation of even spacing, not an optimal solver.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use crate::reviews::emoji::{has_emoji, strip_emojis};

/// Absorbs float noise such as `0.15 * 20 = 3.0000000000000004`.
const FRACTION_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadConstraints {
    pub min_fraction: f64,
    pub max_fraction: f64,
    pub max_run_length: usize,
    pub min_gap_after_max_run: usize,
}

impl Default for SpreadConstraints {
    fn default() -> Self {
        Self {
            min_fraction: 0.10,
            max_fraction: 0.15,
            max_run_length: 2,
            min_gap_after_max_run: 2,
        }
    }
}

impl SpreadConstraints {
    /// Inclusive bounds for the kept count in a batch of `n` lines.
    pub fn target_range(&self, n: usize) -> (usize, usize) {
        let lo = (n as f64 * self.min_fraction + FRACTION_EPSILON).floor() as usize;
        let hi = (n as f64 * self.max_fraction - FRACTION_EPSILON).ceil() as usize;
        (lo, hi.max(lo))
    }
}

/// Applies the quota and spread rules to a batch and returns it in the same order.
pub fn enforce_quota_and_spread<R: Rng + ?Sized>(
    lines: Vec<String>,
    constraints: &SpreadConstraints,
    rng: &mut R,
) -> Vec<String> {
    let n = lines.len();
    let decorated: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| has_emoji(line))
        .map(|(i, _)| i)
        .collect();

    if decorated.is_empty() {
        return lines;
    }

    let (lo, hi) = constraints.target_range(n);
    let target = rng.gen_range(lo..=hi).min(decorated.len());

    let keep = if target == 0 {
        BTreeSet::new()
    } else {
        select_spread(n, &decorated, target, constraints)
    };

    debug!(
        "Emoji spread: batch={}, decorated={}, range=[{}, {}], target={}, kept={:?}",
        n,
        decorated.len(),
        lo,
        hi,
        target,
        keep
    );

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if keep.contains(&i) {
                line
            } else {
                strip_emojis(&line)
            }
        })
        .collect()
}

/// Picks up to `target` indices from `decorated` (ascending) for a batch of `n` lines.
pub fn select_spread(
    n: usize,
    decorated: &[usize],
    target: usize,
    constraints: &SpreadConstraints,
) -> BTreeSet<usize> {
    let mut keep = BTreeSet::new();

    for k in 1..=target {
        let ideal = ideal_slot(k, n, target);

        let valid = decorated
            .iter()
            .copied()
            .filter(|i| !keep.contains(i) && spacing_allows(&keep, *i, constraints));
        let pick = closest(valid, ideal).or_else(|| {
            let unused = decorated.iter().copied().filter(|i| !keep.contains(i));
            closest(unused, ideal)
        });

        if let Some(i) = pick {
            keep.insert(i);
        }
    }

    for &i in decorated {
        if keep.len() >= target {
            break;
        }
        if !keep.contains(&i) && spacing_allows(&keep, i, constraints) {
            keep.insert(i);
        }
    }

    keep
}

/// `round(k·n/(t+1))`, kept inside the batch.
fn ideal_slot(k: usize, n: usize, target: usize) -> usize {
    let slot = (k as f64 * n as f64 / (target + 1) as f64).round() as usize;
    slot.min(n.saturating_sub(1))
}

/// Closest index to `ideal`; ties go to the lower index.
fn closest(candidates: impl Iterator<Item = usize>, ideal: usize) -> Option<usize> {
    candidates.min_by_key(|i| i.abs_diff(ideal))
}

/// Whether committing `candidate` alongside `kept` respects the run-length
/// and post-run gap rules.
fn spacing_allows(kept: &BTreeSet<usize>, candidate: usize, constraints: &SpreadConstraints) -> bool {
    let mut indices: Vec<usize> = kept.iter().copied().collect();
    let pos = indices.partition_point(|&i| i < candidate);
    indices.insert(pos, candidate);

    let runs = maximal_runs(&indices);

    runs.iter().all(|&(start, end)| end - start < constraints.max_run_length)
        && runs.windows(2).all(|pair| {
            let (start, end) = pair[0];
            let next_start = pair[1].0;
            end == start || next_start - end - 1 >= constraints.min_gap_after_max_run
        })
}

/// Maximal runs of consecutive indices as inclusive `(start, end)` pairs.
fn maximal_runs(sorted: &[usize]) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &i in sorted {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == i => *end = i,
            _ => runs.push((i, i)),
        }
    }
    runs
}
