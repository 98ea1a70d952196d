use std::fmt;

use phf::{Set, phf_set};

/// Stitch abbreviations recognised as single tokens, lower-cased.
pub const PRIMITIVES: Set<&'static str> = phf_set! {
    "k",
    "k2tog",
    "m1l",
    "m1r",
    "p",
    "p2tog",
    "ssk",
    "ssp",
    "yo",
};

/// One stitch operation in an expanded sequence.
///
/// Recognised primitives are lower-cased; anything else is kept exactly as
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Classify a fragment of shorthand, lower-casing it if it names a
    /// primitive.
    pub fn from_fragment(fragment: &str) -> Self {
        let lower = fragment.to_lowercase();
        if PRIMITIVES.contains(lower.as_str()) {
            Self(lower)
        } else {
            Self(fragment.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
