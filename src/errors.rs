// Error types for style-sheet parsing and lookup
//
// None of these abort a lookup: the cache turns them into empty results.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read style file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load style grammar: {0}")]
    Language(String),

    #[error("tree-sitter produced no tree for '{}'", path.display())]
    Parse { path: PathBuf },
}

impl StyleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StyleError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StyleResult<T> = Result<T, StyleError>;
