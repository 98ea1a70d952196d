use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlossaryError>;

/// Errors raised while loading or querying a glossary.
#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error("glossary source not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A lookup was attempted before any glossary was loaded.
    #[error("no glossary has been loaded")]
    NotLoaded,

    #[error("failed to read glossary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed glossary {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("glossary keys must be non-empty")]
    EmptyKey,
}
