//! Parse cache keyed by style file path
//!
//! An entry is served only while its modification time equals the source's
//! current one. Files open for editing bypass the cache in both directions.
//! Entries are replaced on re-parse and never evicted.

use crate::errors::{StyleError, StyleResult};
use crate::extractors::base::StyleFileResult;
use crate::extractors::css::parse_style_source;
use crate::source::StyleSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub result: Arc<StyleFileResult>,
}

#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Definition table for `path`, parsing only when needed
    ///
    /// Never fails: an unreadable or unparsable file yields an empty table
    /// so other files in the same lookup are unaffected.
    pub fn get_parsed_file<S: StyleSource + ?Sized>(
        &mut self,
        source: &S,
        path: &Path,
    ) -> Arc<StyleFileResult> {
        if let Some(text) = source.open_buffer_text(path) {
            debug!("'{}' is open for editing, parsing live buffer", path.display());
            return Arc::new(Self::parse_or_empty(path, text));
        }

        match self.load_from_disk(source, path) {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to parse style file '{}': {}", path.display(), e);
                Arc::new(StyleFileResult::empty(path))
            }
        }
    }

    fn load_from_disk<S: StyleSource + ?Sized>(
        &mut self,
        source: &S,
        path: &Path,
    ) -> StyleResult<Arc<StyleFileResult>> {
        let modified = source
            .modified_time(path)
            .map_err(|e| StyleError::io(path, e))?;

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified {
                debug!(
                    "Cache hit for '{}' ({} definitions)",
                    path.display(),
                    entry.result.definitions.len()
                );
                return Ok(Arc::clone(&entry.result));
            }
        }

        let content = source.read_text(path).map_err(|e| StyleError::io(path, e))?;
        let result = Arc::new(parse_style_source(path, content)?);

        debug!(
            "Parsed '{}' from disk ({} definitions)",
            path.display(),
            result.definitions.len()
        );

        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                path: path.to_path_buf(),
                modified,
                result: Arc::clone(&result),
            },
        );

        Ok(result)
    }

    fn parse_or_empty(path: &Path, text: String) -> StyleFileResult {
        parse_style_source(path, text).unwrap_or_else(|e| {
            warn!("Failed to parse style buffer '{}': {}", path.display(), e);
            StyleFileResult::empty(path)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn entry(&self, path: &Path) -> Option<&CacheEntry> {
        self.entries.get(path)
    }
}
