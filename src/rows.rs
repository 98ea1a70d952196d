//! Row-by-row stitch count tracking for multi-line instructions.
//!
//! Each non-blank line is one row, optionally labelled with a `LABEL:`
//! prefix (`R1: [k, p] 4x`). Rows are counted in order, each starting from
//! the previous row's expected end count.

use crate::counter::{CountSummary, compute_counts};
use crate::expand::expand;
use crate::glossary::Glossary;

const DEFAULT_LABEL: &str = "Row";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub label: String,
    pub pattern: String,
    pub start: i64,
    pub end: i64,
}

impl RowReport {
    pub fn delta(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

/// Expected counts for every row in `text`.
pub fn track_rows(text: &str, start: i64, glossary: &Glossary) -> Vec<RowReport> {
    let mut current = start;
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (label, pattern) = split_label(line);
            let steps = compute_counts(&expand(pattern), current, glossary);
            let summary = CountSummary::of(&steps, current);
            let report = RowReport {
                label: label.to_string(),
                pattern: pattern.to_string(),
                start: current,
                end: summary.end,
            };
            current = summary.end;
            report
        })
        .collect()
}

/// The expected count after all rows, or `start` if there are none.
pub fn final_count(reports: &[RowReport], start: i64) -> i64 {
    reports.last().map_or(start, |r| r.end)
}

fn split_label(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((label, pattern)) => (label.trim(), pattern.trim()),
        None => (DEFAULT_LABEL, line),
    }
}

/// Outcome of comparing a knitter's actual count with the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheck {
    Match,
    Mismatch {
        expected: i64,
        actual: i64,
        /// `actual - expected`.
        difference: i64,
    },
}

pub fn check_actual(expected: i64, actual: i64) -> CountCheck {
    if expected == actual {
        CountCheck::Match
    } else {
        CountCheck::Mismatch {
            expected,
            actual,
            difference: actual - expected,
        }
    }
}
