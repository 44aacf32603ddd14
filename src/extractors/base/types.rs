// Base Extractor Types for Stylejump
//
// All data structures produced by style-sheet extraction and consumed by the
// class resolver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A point in a source file
///
/// Both fields are 0-based. `column` counts bytes from the start of the line,
/// matching tree-sitter's `Point`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row as u32,
            column: point.column as u32,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Span covering a rule's selector text, `end` exclusive at the opening `{`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SelectorRange {
    pub start: Position,
    pub end: Position,
}

/// One class name defined by a style rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleDefinition {
    /// Class name without the leading `.`
    pub name: String,
    /// Start of the owning rule
    pub position: Position,
    /// Selector declaration span (None when the parse carried no offsets)
    pub selector_range: Option<SelectorRange>,
    /// Block comment found one or two lines above the rule, or empty
    pub doc_comment: String,
    /// Style file the rule lives in
    pub source_file: PathBuf,
    /// Fully normalized selector that produced `name`
    pub source_selector: String,
}

impl StyleDefinition {
    /// Span a caller should select when jumping to this definition
    ///
    /// Falls back to a single column at `position` when no selector range is known.
    pub fn target_span(&self) -> (Position, Position) {
        match self.selector_range {
            Some(range) => (range.start, range.end),
            None => (
                self.position,
                Position::new(self.position.line, self.position.column + 1),
            ),
        }
    }
}

/// Every definition extracted from a single style file, in document order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleFileResult {
    pub file: PathBuf,
    pub definitions: Vec<StyleDefinition>,
}

impl StyleFileResult {
    /// Result for a file that could not be read or parsed
    pub fn empty(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            definitions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Names of all definitions, in table order
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&StyleDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }
}

/// How a resolved location matched the query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Definition name equals the query
    Exact,
    /// Definition is a BEM ancestor (block or element) of the query
    Bem,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Bem => write!(f, "bem"),
        }
    }
}

/// A definition location returned to go-to-definition callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassLocation {
    pub file: PathBuf,
    pub start: Position,
    pub end: Position,
    pub match_kind: MatchKind,
}

impl ClassLocation {
    pub fn from_definition(definition: &StyleDefinition, match_kind: MatchKind) -> Self {
        let (start, end) = definition.target_span();
        Self {
            file: definition.source_file.clone(),
            start,
            end,
            match_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(range: Option<SelectorRange>) -> StyleDefinition {
        StyleDefinition {
            name: "card".to_string(),
            position: Position::new(4, 2),
            selector_range: range,
            doc_comment: String::new(),
            source_file: PathBuf::from("/app/pages/index.wxss"),
            source_selector: ".card".to_string(),
        }
    }

    #[test]
    fn test_target_span_prefers_selector_range() {
        let range = SelectorRange {
            start: Position::new(4, 2),
            end: Position::new(4, 8),
        };
        let def = definition(Some(range));
        assert_eq!(def.target_span(), (Position::new(4, 2), Position::new(4, 8)));
    }

    #[test]
    fn test_target_span_falls_back_to_single_column() {
        let def = definition(None);
        assert_eq!(def.target_span(), (Position::new(4, 2), Position::new(4, 3)));
    }

    #[test]
    fn test_location_carries_file_and_match_kind() {
        let loc = ClassLocation::from_definition(&definition(None), MatchKind::Bem);
        assert_eq!(loc.file, PathBuf::from("/app/pages/index.wxss"));
        assert_eq!(loc.match_kind, MatchKind::Bem);
        assert_eq!(loc.match_kind.to_string(), "bem");
    }
}
