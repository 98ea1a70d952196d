//! Load-once glossary store.
//!
//! A [`GlossaryStore`] is owned by the caller (usually held for the whole
//! process) and remembers every glossary it has read, keyed by the
//! canonicalised source path. Loading the same path again hands back the
//! cached instance without touching the filesystem.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::{Glossary, GlossaryEntry, parse_entries};
use crate::error::{GlossaryError, Result};

#[derive(Debug, Default)]
struct Cache {
    by_path: HashMap<PathBuf, Arc<Glossary>>,
    current: Option<Arc<Glossary>>,
}

#[derive(Debug, Default)]
pub struct GlossaryStore {
    cache: Mutex<Cache>,
    reads: AtomicUsize,
}

impl GlossaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the glossary at `path`, reading it only if this resolved path
    /// has not been loaded before.
    ///
    /// The lock is held across the read, so concurrent callers for the same
    /// path wait for the first one and then share its result. A failed load
    /// caches nothing.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Glossary>> {
        let path = path.as_ref();
        let resolved = fs::canonicalize(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => GlossaryError::NotFound {
                path: path.to_path_buf(),
            },
            _ => GlossaryError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut cache = self.lock();
        if let Some(glossary) = cache.by_path.get(&resolved).cloned() {
            debug!(path = %resolved.display(), "glossary cache hit");
            cache.current = Some(Arc::clone(&glossary));
            return Ok(glossary);
        }

        let glossary = Arc::new(read_glossary(&resolved)?);
        self.reads.fetch_add(1, Ordering::Relaxed);
        info!(
            path = %resolved.display(),
            entries = glossary.len(),
            "glossary loaded"
        );
        cache.by_path.insert(resolved, Arc::clone(&glossary));
        cache.current = Some(Arc::clone(&glossary));
        Ok(glossary)
    }

    /// The most recently loaded glossary.
    pub fn current(&self) -> Result<Arc<Glossary>> {
        self.lock().current.clone().ok_or(GlossaryError::NotLoaded)
    }

    /// Approximate lookup against the most recently loaded glossary.
    pub fn find_term(&self, query: &str) -> Result<Option<(String, GlossaryEntry)>> {
        let glossary = self.current()?;
        Ok(glossary
            .find_term(query)
            .map(|(key, entry)| (key.to_string(), entry.clone())))
    }

    /// Number of times a glossary source has actually been read.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, Cache> {
        // The cache is only mutated after a glossary is fully built, so a
        // poisoned lock still guards consistent data.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_glossary(path: &Path) -> Result<Glossary> {
    let json = fs::read_to_string(path).map_err(|source| GlossaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_entries(&json).map_err(|source| GlossaryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Glossary::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::thread;

    use tempfile::NamedTempFile;

    use super::*;

    const SOURCE: &str = r#"{
        "k": {"name": "knit", "desc": "Knit one", "delta": 0},
        "ssk": {"name": "slip slip knit", "desc": "Left-leaning decrease", "delta": -1,
                "aliases": ["slip slip knit"]},
        "M1L": {"name": "make one left", "desc": "Left-leaning increase", "delta": 1,
                "aliases": ["m1l"]}
    }"#;

    fn glossary_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_reads_once_per_path() {
        let file = glossary_file(SOURCE);
        let store = GlossaryStore::new();
        let first = store.load(file.path()).unwrap();
        let second = store.load(file.path()).unwrap();
        assert_eq!(store.reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.index(), second.index());
    }

    #[test]
    fn test_different_path_reads_again() {
        let a = glossary_file(SOURCE);
        let b = glossary_file(r#"{"yo": {"name": "yarn over", "delta": 1}}"#);
        let store = GlossaryStore::new();
        store.load(a.path()).unwrap();
        store.load(b.path()).unwrap();
        assert_eq!(store.reads(), 2);
        assert!(store.current().unwrap().get("yo").is_some());

        // Switching back hits the cache.
        store.load(a.path()).unwrap();
        assert_eq!(store.reads(), 2);
        assert!(store.current().unwrap().get("ssk").is_some());
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let store = GlossaryStore::new();
        let err = store.load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GlossaryError::NotFound { .. }));
        assert!(matches!(store.current(), Err(GlossaryError::NotLoaded)));
        assert_eq!(store.reads(), 0);
    }

    #[test]
    fn test_malformed_source_not_cached() {
        let file = glossary_file("{ not json");
        let store = GlossaryStore::new();
        assert!(matches!(
            store.load(file.path()),
            Err(GlossaryError::Parse { .. })
        ));
        assert!(matches!(store.current(), Err(GlossaryError::NotLoaded)));
    }

    #[test]
    fn test_find_term_before_load() {
        let store = GlossaryStore::new();
        assert!(matches!(store.find_term("k"), Err(GlossaryError::NotLoaded)));
    }

    #[test]
    fn test_find_term_after_load() {
        let file = glossary_file(SOURCE);
        let store = GlossaryStore::new();
        store.load(file.path()).unwrap();
        let (key, entry) = store.find_term("slip slip knit").unwrap().unwrap();
        assert_eq!(key, "ssk");
        assert_eq!(entry.delta, Some(-1));
        assert_eq!(store.find_term("  ").unwrap(), None);
    }

    #[test]
    fn test_bundled_glossary() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/symbols.json");
        let store = GlossaryStore::new();
        let glossary = store.load(path).unwrap();
        assert_eq!(glossary.get("M1L").and_then(|e| e.delta), Some(1));
        assert_eq!(glossary.find_term("mk1l").map(|(k, _)| k), Some("M1L"));
        assert_eq!(glossary.find_term("걸어코").map(|(k, _)| k), Some("yo"));
    }

    #[test]
    fn test_concurrent_loads_read_once() {
        let file = glossary_file(SOURCE);
        let store = GlossaryStore::new();
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let g = store.load(file.path()).unwrap();
                    assert_eq!(g.len(), 3);
                });
            }
        });
        assert_eq!(store.reads(), 1);
    }
}
