//! Style source access
//!
//! The engine never touches the filesystem directly. Everything it needs
//! (live editor buffers, modification times, persisted content, existence
//! probes) goes through [`StyleSource`], so editors can plug in their
//! document model and tests can drive the clock.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Read access to style files
pub trait StyleSource {
    /// Current text of the file if it is open for editing
    fn open_buffer_text(&self, path: &Path) -> Option<String>;

    /// Persisted modification time
    fn modified_time(&self, path: &Path) -> io::Result<SystemTime>;

    /// Persisted content
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Whether a file exists on disk or as an open buffer
    fn exists(&self, path: &Path) -> bool;
}

/// Filesystem-backed source with an overlay of open editor buffers
#[derive(Debug, Default)]
pub struct FsStyleSource {
    open_buffers: HashMap<PathBuf, String>,
}

impl FsStyleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a file as open for editing with the given buffer content
    pub fn open_buffer(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        let path = path.into();
        debug!("Opened style buffer '{}'", path.display());
        self.open_buffers.insert(path, text.into());
    }

    /// Stop overlaying a buffer; the persisted file is used again
    pub fn close_buffer(&mut self, path: &Path) -> Option<String> {
        self.open_buffers.remove(path)
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.open_buffers.contains_key(path)
    }
}

impl StyleSource for FsStyleSource {
    fn open_buffer_text(&self, path: &Path) -> Option<String> {
        self.open_buffers.get(path).cloned()
    }

    fn modified_time(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.open_buffers.contains_key(path) || path.is_file()
    }
}
