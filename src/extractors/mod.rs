//! Style-sheet extractors
//!
//! Tree-sitter based extraction of class definitions from style files.
//!
//! # Architecture
//!
//! - `base` - shared extractor plumbing and the definition types
//! - `css` - rule walker for CSS and its dialects (WXSS, SCSS, LESS)

pub mod base;
pub mod css;

// Re-export the public API
pub use base::{
    BaseExtractor, ClassLocation, MatchKind, Position, SelectorRange, StyleDefinition,
    StyleFileResult,
};
pub use css::{parse_style_source, StyleExtractor};
