// PyO3 Bindings Module
//
// Python bindings for the style engine. Wraps StyleDefinition and
// ClassLocation in PyO3-compatible types and exposes one process-wide engine.

mod api;
mod definition;

// Re-export for lib.rs
pub use api::{
    close_buffer, configure, detect_dialect, open_buffer, parse_style_file,
    resolve_class_definition,
};
pub use definition::{PyClassLocation, PyStyleDefinition};
