// Stylejump Core - tree-sitter powered class definition lookup for style sheets
//
// Resolves class tokens used in templates to the rules that define them in
// CSS, WXSS, SCSS and LESS files. Usable as a Rust library or, with the
// `python` feature, as a PyO3 extension module.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod extractors;
pub mod language;
pub mod provider;
pub mod resolver;
pub mod source;
pub mod utils;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use cache::{CacheEntry, ParseCache};
pub use config::StyleConfig;
pub use engine::{StyleEngine, TemplateDocument, TemplateFile};
pub use errors::{StyleError, StyleResult};
pub use extractors::base::{
    ClassLocation, MatchKind, Position, SelectorRange, StyleDefinition, StyleFileResult,
};
pub use extractors::css::{
    extract_comments, normalize_selector, parse_style_source, resolve_selector_range,
    StyleExtractor,
};
pub use language::StyleDialect;
pub use provider::{
    classify, ComponentResolver, CursorContext, DefinitionProvider, DefinitionTarget, Location,
    ScriptSymbolKind, ScriptSymbols, TagDescriptor,
};
pub use resolver::resolve_class;
pub use source::{FsStyleSource, StyleSource};

/// Stylejump Core Python module
///
/// Provides class definition lookup for CSS-family style sheets.
#[cfg(feature = "python")]
#[pymodule]
fn stylejump_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Add Python functions
    m.add_function(wrap_pyfunction!(bindings::parse_style_file, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::resolve_class_definition, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::configure, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::detect_dialect, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::open_buffer, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::close_buffer, m)?)?;

    // Add Python classes
    m.add_class::<bindings::PyStyleDefinition>()?;
    m.add_class::<bindings::PyClassLocation>()?;

    Ok(())
}
