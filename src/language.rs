//! Language Support - Style dialect detection and tree-sitter configuration
//!
//! Every dialect is parsed with the CSS grammar. Dialects only differ in the
//! pre-processing applied before parsing (SCSS/LESS line comments).

use crate::errors::{StyleError, StyleResult};
use std::path::Path;

/// Style-sheet dialect inferred from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleDialect {
    Css,
    Wxss,
    Scss,
    Less,
    Unknown,
}

impl StyleDialect {
    /// Detect dialect from a file path's extension
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "css" => StyleDialect::Css,
            "wxss" | "acss" | "ttss" => StyleDialect::Wxss,
            "scss" | "sass" => StyleDialect::Scss,
            "less" => StyleDialect::Less,
            _ => StyleDialect::Unknown,
        }
    }

    /// Whether `//` starts a line comment in this dialect
    pub fn has_line_comments(&self) -> bool {
        matches!(self, StyleDialect::Scss | StyleDialect::Less)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleDialect::Css => "css",
            StyleDialect::Wxss => "wxss",
            StyleDialect::Scss => "scss",
            StyleDialect::Less => "less",
            StyleDialect::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StyleDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the tree-sitter language used for a dialect
///
/// Unknown extensions are still parsed as CSS; a style file listed in the
/// configuration is trusted to be CSS-like.
pub fn get_tree_sitter_language(_dialect: StyleDialect) -> tree_sitter::Language {
    tree_sitter_css::LANGUAGE.into()
}

/// Build a parser configured for a dialect
pub fn create_parser(dialect: StyleDialect) -> StyleResult<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&get_tree_sitter_language(dialect))
        .map_err(|e| StyleError::Language(format!("{} grammar: {}", dialect, e)))?;
    Ok(parser)
}
