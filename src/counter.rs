//! Running stitch count over an expanded token sequence.

use phf::{Map, phf_map};
use tracing::debug;

use crate::expand::Token;
use crate::glossary::Glossary;

/// Deltas used when the glossary has nothing to say about a stitch.
const BUILTIN_DELTAS: Map<&'static str, i64> = phf_map! {
    "k2tog" => -1,
    "m1l" => 1,
    "m1r" => 1,
    "p2tog" => -1,
    "ssk" => -1,
    "ssp" => -1,
    "yo" => 1,
};

/// Where a step's delta came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaSource {
    /// Plain knit or purl.
    Plain,
    Glossary,
    Builtin,
    /// Not a known stitch; counted as zero.
    Unknown,
}

/// One row of the count log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountStep {
    /// 1-based.
    pub step: usize,
    pub token: Token,
    /// Stitch count after this token. Not clamped at zero; saturates at the
    /// `i64` bounds.
    pub count: i64,
    pub delta: i64,
    pub source: DeltaSource,
}

/// Resolve the stitch-count change for one token.
///
/// Plain `k`/`p` are always 0. Otherwise the glossary is consulted (`m1`
/// stitches are stored upper-cased there), then the built-in table. Anything
/// left is unknown and contributes 0.
pub fn stitch_delta(token: &str, glossary: &Glossary) -> (i64, DeltaSource) {
    let key = token.to_lowercase();
    if key == "k" || key == "p" {
        return (0, DeltaSource::Plain);
    }

    let glossary_key = if key.starts_with("m1") {
        key.to_uppercase()
    } else {
        key.clone()
    };
    if let Some(delta) = glossary.get(&glossary_key).and_then(|entry| entry.delta) {
        return (delta, DeltaSource::Glossary);
    }

    match BUILTIN_DELTAS.get(key.as_str()) {
        Some(&delta) => (delta, DeltaSource::Builtin),
        None => (0, DeltaSource::Unknown),
    }
}

/// Fold `tokens` into a step-by-step count log starting from `start`.
pub fn compute_counts(tokens: &[Token], start: i64, glossary: &Glossary) -> Vec<CountStep> {
    let mut count = start;
    let steps: Vec<CountStep> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let (delta, source) = stitch_delta(token.as_str(), glossary);
            count = count.saturating_add(delta);
            CountStep {
                step: i + 1,
                token: token.clone(),
                count,
                delta,
                source,
            }
        })
        .collect();
    debug!(start, end = count, steps = steps.len(), "computed counts");
    steps
}

/// Tokens that were counted as zero because nothing recognised them.
pub fn unresolved(steps: &[CountStep]) -> Vec<&Token> {
    steps
        .iter()
        .filter(|s| s.source == DeltaSource::Unknown)
        .map(|s| &s.token)
        .collect()
}

/// Totals for one count log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    pub steps: usize,
    pub start: i64,
    pub end: i64,
}

impl CountSummary {
    pub fn of(steps: &[CountStep], start: i64) -> Self {
        Self {
            steps: steps.len(),
            start,
            end: steps.last().map_or(start, |s| s.count),
        }
    }

    pub fn net(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}
