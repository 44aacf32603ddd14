// PyStyleDefinition / PyClassLocation - PyO3 wrappers for the lookup types
//
// All fields are read-only from Python. Positions are exposed as 0-based
// (line, column) tuples where column is a UTF-8 byte offset into the line.
// Hosts that address text in UTF-16 units (VS Code, LSP) must convert.

use crate::extractors::base::{ClassLocation, Position, StyleDefinition};
use pyo3::prelude::*;

fn as_tuple(position: Position) -> (u32, u32) {
    (position.line, position.column)
}

/// Python-accessible StyleDefinition wrapper
#[pyclass(name = "StyleDefinition")]
pub struct PyStyleDefinition {
    inner: StyleDefinition,
}

impl PyStyleDefinition {
    pub fn from_definition(definition: StyleDefinition) -> Self {
        PyStyleDefinition { inner: definition }
    }
}

#[pymethods]
impl PyStyleDefinition {
    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    /// Rule start as (line, byte column), both 0-based
    #[getter]
    fn position(&self) -> (u32, u32) {
        as_tuple(self.inner.position)
    }

    /// Selector span as ((line, byte column), (line, byte column)), or None
    #[getter]
    fn selector_range(&self) -> Option<((u32, u32), (u32, u32))> {
        self.inner
            .selector_range
            .map(|range| (as_tuple(range.start), as_tuple(range.end)))
    }

    #[getter]
    fn doc_comment(&self) -> String {
        self.inner.doc_comment.clone()
    }

    #[getter]
    fn source_file(&self) -> String {
        self.inner.source_file.to_string_lossy().to_string()
    }

    #[getter]
    fn source_selector(&self) -> String {
        self.inner.source_selector.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "StyleDefinition(name='{}', position={}, source_file='{}')",
            self.inner.name,
            self.inner.position,
            self.inner.source_file.display()
        )
    }
}

/// Python-accessible ClassLocation wrapper
#[pyclass(name = "ClassLocation")]
pub struct PyClassLocation {
    inner: ClassLocation,
}

impl PyClassLocation {
    pub fn from_location(location: ClassLocation) -> Self {
        PyClassLocation { inner: location }
    }
}

#[pymethods]
impl PyClassLocation {
    #[getter]
    fn file(&self) -> String {
        self.inner.file.to_string_lossy().to_string()
    }

    /// Jump target start as (line, byte column), both 0-based
    #[getter]
    fn start(&self) -> (u32, u32) {
        as_tuple(self.inner.start)
    }

    /// Exclusive end as (line, byte column)
    #[getter]
    fn end(&self) -> (u32, u32) {
        as_tuple(self.inner.end)
    }

    /// "exact" or "bem"
    #[getter]
    fn match_kind(&self) -> String {
        self.inner.match_kind.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "ClassLocation(file='{}', start={}, end={}, match_kind='{}')",
            self.inner.file.display(),
            self.inner.start,
            self.inner.end,
            self.inner.match_kind
        )
    }
}
