// BaseExtractor implementation for Stylejump
//
// Shared state and node helpers for style-sheet extraction.

use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::Node;

use super::types::Position;

/// Base implementation for style extractors
///
/// Owns the file content the tree was parsed from, so node text and byte
/// offsets can be resolved without threading the source through every call.
pub struct BaseExtractor {
    pub file_path: PathBuf,
    pub content: String,
}

impl BaseExtractor {
    /// Create a new base extractor
    ///
    /// Relative paths are joined to `workspace_root` so definitions always
    /// carry an absolute `source_file`. Paths are not canonicalized: a file
    /// that only lives in an editor buffer may not exist on disk yet.
    pub fn new(file_path: &Path, content: String, workspace_root: &Path) -> Self {
        let absolute = if file_path.is_absolute() {
            file_path.to_path_buf()
        } else {
            workspace_root.join(file_path)
        };

        debug!(
            "BaseExtractor path: '{}' -> '{}'",
            file_path.display(),
            absolute.display()
        );

        Self {
            file_path: absolute,
            content,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Start of a node as a 0-based line/column position
    pub fn start_position(&self, node: &Node) -> Position {
        node.start_position().into()
    }
}
