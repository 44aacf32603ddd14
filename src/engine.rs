//! StyleEngine - Public API for class definition lookup
//!
//! Finds the style files that apply to a template (its sibling style file and
//! the configured global style files), parses them through the cache, and
//! resolves class tokens against them.

use crate::cache::ParseCache;
use crate::config::StyleConfig;
use crate::extractors::base::{ClassLocation, Position, StyleFileResult};
use crate::resolver::resolve_class;
use crate::source::StyleSource;
use crate::utils::paths::{display_path, is_glob_pattern, resolve_against_root};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The template document a lookup starts from
pub trait TemplateDocument {
    fn file_path(&self) -> &Path;

    /// Workspace root used to resolve global style files, if any
    fn workspace_root(&self) -> Option<&Path>;
}

/// Plain template document description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub workspace_root: Option<PathBuf>,
}

impl TemplateFile {
    pub fn new(path: impl Into<PathBuf>, workspace_root: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workspace_root,
        }
    }
}

impl TemplateDocument for TemplateFile {
    fn file_path(&self) -> &Path {
        &self.path
    }

    fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }
}

pub struct StyleEngine<S: StyleSource> {
    source: S,
    config: StyleConfig,
    cache: ParseCache,
}

impl<S: StyleSource> StyleEngine<S> {
    pub fn new(source: S, config: StyleConfig) -> Self {
        Self {
            source,
            config,
            cache: ParseCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, e.g. to open or close editor buffers
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StyleConfig) {
        self.config = config;
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    /// Definition table for one style file, through the cache
    pub fn parse_file(&mut self, path: &Path) -> Arc<StyleFileResult> {
        self.cache.get_parsed_file(&self.source, path)
    }

    /// Sibling style file of a template: first configured extension that exists
    pub fn local_style_file(&self, template: &Path) -> Option<PathBuf> {
        let dir = template.parent()?;
        let stem = template.file_stem()?.to_str()?;

        self.config
            .style_extensions
            .iter()
            .map(|ext| dir.join(format!("{}.{}", stem, ext)))
            .find(|candidate| self.source.exists(candidate))
    }

    /// Configured global style files, in listed order
    ///
    /// Glob entries expand to their matches in sorted order; an invalid
    /// pattern is logged and skipped.
    pub fn global_style_files(&self, workspace_root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in &self.config.global_style_files {
            let resolved = resolve_against_root(entry, workspace_root);
            if !is_glob_pattern(entry) {
                files.push(resolved);
                continue;
            }

            let pattern = resolved.to_string_lossy().to_string();
            match glob::glob(&pattern) {
                Ok(paths) => {
                    let mut matches: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
                    matches.sort();
                    files.extend(matches);
                }
                Err(e) => warn!("Skipping invalid global style pattern '{}': {}", entry, e),
            }
        }

        files
    }

    /// Parsed style files that apply to a template: local first, then globals
    pub fn style_files_for(
        &mut self,
        template: &Path,
        workspace_root: Option<&Path>,
    ) -> Vec<Arc<StyleFileResult>> {
        let mut paths = Vec::new();

        match self.local_style_file(template) {
            Some(local) => {
                debug!("Local style file: {}", display_path(&local, workspace_root));
                paths.push(local);
            }
            None => debug!("No local style file for '{}'", template.display()),
        }

        match workspace_root {
            Some(root) => paths.extend(self.global_style_files(root)),
            None => debug!("No workspace root, skipping global style files"),
        }

        paths.iter().map(|path| self.parse_file(path)).collect()
    }

    /// Resolve a class token under the cursor to its definitions
    ///
    /// `cancel` is checked once, before any file is read.
    pub fn resolve_class_definition(
        &mut self,
        query: &str,
        document: &dyn TemplateDocument,
        position: Position,
        cancel: Option<&AtomicBool>,
    ) -> Vec<ClassLocation> {
        if cancel.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            debug!("Lookup for '{}' cancelled before start", query);
            return Vec::new();
        }

        let template = document.file_path();
        debug!(
            "Resolving class '{}' at {} in '{}'",
            query,
            position,
            template.display()
        );

        let files = self.style_files_for(template, document.workspace_root());
        let locations = resolve_class(query, &files);

        info!(
            "Class '{}' resolved to {} locations across {} style files",
            query,
            locations.len(),
            files.len()
        );
        locations
    }
}
