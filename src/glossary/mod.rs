//! Knitting abbreviation glossary with approximate lookup.
//!
//! A glossary maps canonical keys (`"k2tog"`, `"M1L"`, ...) to their
//! [`GlossaryEntry`]. The searchable index holds every key in definition
//! order followed by every alias in definition order, skipping strings
//! already present. It is built once when the glossary is constructed and
//! never changes afterwards.

pub mod entry;
pub mod fuzzy;
pub mod loader;

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{GlossaryError, Result};

pub use entry::{GlossaryEntry, Media};
pub use loader::GlossaryStore;

/// The result of an approximate lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch<'a> {
    /// Canonical key of the owning entry.
    pub key: &'a str,
    pub entry: &'a GlossaryEntry,
    /// The index string that scored best; either `key` or one of its aliases.
    pub matched: &'a str,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<(String, GlossaryEntry)>,
    positions: HashMap<String, usize>,
    index: Vec<String>,
}

impl Glossary {
    /// Build a glossary from `(key, entry)` pairs in definition order.
    ///
    /// A repeated key replaces the earlier entry but keeps its position.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, GlossaryEntry)>,
    {
        let mut glossary = Glossary::default();
        for (key, entry) in entries {
            if key.is_empty() {
                return Err(GlossaryError::EmptyKey);
            }
            match glossary.positions.get(&key) {
                Some(&pos) => glossary.entries[pos].1 = entry,
                None => {
                    glossary.positions.insert(key.clone(), glossary.entries.len());
                    glossary.entries.push((key, entry));
                }
            }
        }
        glossary.index = build_index(&glossary.entries);
        Ok(glossary)
    }

    pub fn get(&self, key: &str) -> Option<&GlossaryEntry> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &GlossaryEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// The searchable index: keys, then aliases, without duplicates.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry whose key or alias best matches `query`.
    ///
    /// Blank queries and empty glossaries never match. Otherwise the best
    /// candidate is always returned, however low its score.
    pub fn find_term(&self, query: &str) -> Option<(&str, &GlossaryEntry)> {
        self.find_term_scored(query).map(|m| (m.key, m.entry))
    }

    /// Like [`Glossary::find_term`], but rejects matches scoring below
    /// `min_score` (0 to 100).
    pub fn find_term_with_floor(&self, query: &str, min_score: f64) -> Option<TermMatch<'_>> {
        self.find_term_scored(query).filter(|m| m.score >= min_score)
    }

    pub fn find_term_scored(&self, query: &str) -> Option<TermMatch<'_>> {
        if query.trim().is_empty() {
            return None;
        }
        let (i, score) = fuzzy::best_match(query, self.index.iter().map(String::as_str))?;
        let matched = self.index[i].as_str();

        if let Some(&pos) = self.positions.get(matched) {
            let (key, entry) = &self.entries[pos];
            return Some(TermMatch {
                key,
                entry,
                matched,
                score,
            });
        }
        self.entries
            .iter()
            .find(|(_, entry)| entry.aliases.iter().any(|a| a == matched))
            .map(|(key, entry)| TermMatch {
                key,
                entry,
                matched,
                score,
            })
    }

    /// Keys whose key or any alias appears in `text`, ignoring case.
    ///
    /// The result is sorted and has no duplicates.
    pub fn detect_terms(&self, text: &str) -> Vec<&str> {
        let haystack = text.to_lowercase();
        let mut found: Vec<&str> = self
            .entries
            .iter()
            .filter(|(key, entry)| {
                std::iter::once(key)
                    .chain(entry.aliases.iter())
                    .filter(|s| !s.is_empty())
                    .any(|s| haystack.contains(&s.to_lowercase()))
            })
            .map(|(key, _)| key.as_str())
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }
}

/// Parse a glossary source, an object mapping each key to its entry, into
/// `(key, entry)` pairs in source order. Feed the result to
/// [`Glossary::from_entries`].
pub fn parse_entries(json: &str) -> serde_json::Result<Vec<(String, GlossaryEntry)>> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    object
        .into_iter()
        .map(|(key, value)| serde_json::from_value(value).map(|entry| (key, entry)))
        .collect()
}

fn build_index(entries: &[(String, GlossaryEntry)]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut index = Vec::new();
    for (key, _) in entries {
        if seen.insert(key) {
            index.push(key.clone());
        }
    }
    for (key, entry) in entries {
        for alias in &entry.aliases {
            if alias.is_empty() {
                warn!(key = %key, "skipping empty alias");
                continue;
            }
            if seen.insert(alias) {
                index.push(alias.clone());
            }
        }
    }
    index
}
