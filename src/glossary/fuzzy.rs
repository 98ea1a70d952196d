//! Token-set similarity scoring for approximate glossary lookup.
//!
//! Both strings are split on whitespace into lower-cased word sets, so word
//! order and repeated words do not matter. The shared words and the words
//! unique to each side are compared pairwise with normalised Levenshtein
//! similarity and the best of those comparisons is the score. A score of
//! `100.0` means one word set contains the other.

use std::collections::BTreeSet;

use itertools::Itertools;
use strsim::normalized_levenshtein;

/// The highest possible score.
pub const PERFECT: f64 = 100.0;

fn words(s: &str) -> BTreeSet<String> {
    s.split_whitespace().map(str::to_lowercase).collect()
}

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * PERFECT
}

/// Score `a` against `b` in the range `0.0..=100.0`.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let words_a = words(a);
    let words_b = words(b);
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let common = words_a.intersection(&words_b).join(" ");
    let only_a = words_a.difference(&words_b).join(" ");
    let only_b = words_b.difference(&words_a).join(" ");

    if !common.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return PERFECT;
    }

    let mut best = ratio(&only_a, &only_b);
    if !common.is_empty() {
        let with_a = format!("{common} {only_a}");
        let with_b = format!("{common} {only_b}");
        best = best.max(ratio(&common, &with_a)).max(ratio(&common, &with_b));
    }
    best
}

/// Find the best-scoring candidate for `query`.
///
/// Returns the candidate's position and its score. Ties go to the candidate
/// that comes first. `None` only when there are no candidates.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.into_iter().enumerate() {
        let score = token_set_ratio(query, candidate);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best
}
