//! Knitting shorthand expansion and stitch counting.
//!
//! # Example
//!
//! ```rust
//! use silmari::{Glossary, compute_counts, expand};
//!
//! let tokens = expand("[k2tog, yo] 3x, m1L");
//! let steps = compute_counts(&tokens, 20, &Glossary::default());
//!
//! assert_eq!(steps.len(), 7);
//! assert_eq!(steps.last().map(|s| s.count), Some(21));
//! ```

pub mod counter;
mod error;
pub mod expand;
pub mod glossary;
pub mod logging;
pub mod rows;

pub use counter::{CountStep, CountSummary, DeltaSource, compute_counts, stitch_delta, unresolved};
pub use error::{GlossaryError, Result};
pub use expand::{MAX_REPEAT, Token, expand};
pub use glossary::{Glossary, GlossaryEntry, GlossaryStore, Media, TermMatch};
pub use rows::{CountCheck, RowReport, check_actual, final_count, track_rows};
