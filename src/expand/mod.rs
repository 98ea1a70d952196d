//! Expansion of knitting shorthand into a flat stitch sequence.
//!
//! ```rust
//! use silmari::expand;
//!
//! let tokens = expand("[(p, k) x 2, m1L] x 2");
//! assert_eq!(
//!     tokens,
//!     ["p", "k", "p", "k", "m1l", "p", "k", "p", "k", "m1l"]
//! );
//! ```

mod scanner;
pub mod token;

use tracing::debug;

pub use scanner::MAX_REPEAT;
pub use token::{PRIMITIVES, Token};

/// Expand a shorthand pattern into its stitch-by-stitch token sequence.
///
/// Never fails: anything that is not recognised shorthand is passed through
/// as a token of its own. Repeat counts and runs longer than [`MAX_REPEAT`]
/// are not expanded; the oversized text is passed through instead.
pub fn expand(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern
        .chars()
        .map(|c| if c == '×' { 'x' } else { c })
        .collect();
    let tokens = scanner::scan(&chars);
    debug!(pattern, tokens = tokens.len(), "expanded pattern");
    tokens
}

#[cfg(test)]
mod tests;
