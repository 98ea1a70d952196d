//! Glossary entry types, as stored in the glossary source.

use serde::Deserialize;

/// One abbreviation in the glossary.
///
/// `delta` is the net change to the stitch count contributed by one
/// occurrence of the stitch. It is optional in the source; an absent delta
/// defers to the built-in table in [`crate::counter`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GlossaryEntry {
    #[serde(alias = "name_ko")]
    pub name: String,
    #[serde(alias = "desc_ko", default)]
    pub desc: String,
    #[serde(default)]
    pub delta: Option<i64>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub compare: Vec<String>,
    #[serde(default)]
    pub media: Vec<Media>,
}

impl GlossaryEntry {
    pub fn new(name: &str, desc: &str) -> Self {
        Self {
            name: name.to_string(),
            desc: desc.to_string(),
            delta: None,
            aliases: Vec::new(),
            compare: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn with_delta(mut self, delta: i64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }
}

/// A display-only reference to a video, image or page about a technique.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}
