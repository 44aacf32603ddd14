// Base Extractor Types for Stylejump
//
// - types.rs: All data structures (Position, StyleDefinition, StyleFileResult, ClassLocation)
// - extractor.rs: BaseExtractor implementation (content ownership and node helpers)

pub mod extractor;
pub mod types;

// Re-export key types for external use
pub use extractor::BaseExtractor;
pub use types::{
    ClassLocation, MatchKind, Position, SelectorRange, StyleDefinition, StyleFileResult,
};
