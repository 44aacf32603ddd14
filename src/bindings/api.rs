// API Functions - PyO3-exposed functions for Python
//
// One engine serves the whole process. Calls are serialized on its mutex,
// so the parse cache is never touched concurrently.

use super::{PyClassLocation, PyStyleDefinition};
use crate::config::StyleConfig;
use crate::engine::{StyleEngine, TemplateFile};
use crate::extractors::base::Position;
use crate::language::StyleDialect;
use crate::source::{FsStyleSource, StyleSource};
use once_cell::sync::Lazy;
use pyo3::exceptions::{PyOSError, PyRuntimeError};
use pyo3::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static ENGINE: Lazy<Mutex<StyleEngine<FsStyleSource>>> =
    Lazy::new(|| Mutex::new(StyleEngine::new(FsStyleSource::new(), StyleConfig::default())));

fn engine() -> PyResult<MutexGuard<'static, StyleEngine<FsStyleSource>>> {
    ENGINE
        .lock()
        .map_err(|e| PyRuntimeError::new_err(format!("Style engine lock poisoned: {}", e)))
}

/// Parse a style file into its class definitions
///
/// Args:
///     path (str): Style file path (.wxss, .css, .scss, .less, ...)
///
/// Returns:
///     list[StyleDefinition]: Definitions in document order
///
/// Raises:
///     OSError: If the file does not exist and is not an open buffer
#[pyfunction]
#[pyo3(signature = (path))]
pub fn parse_style_file(path: &str) -> PyResult<Vec<PyStyleDefinition>> {
    let path = Path::new(path);
    let mut engine = engine()?;

    if !engine.source().exists(path) {
        return Err(PyOSError::new_err(format!(
            "Style file not found: {}",
            path.display()
        )));
    }

    let result = engine.parse_file(path);
    Ok(result
        .definitions
        .iter()
        .map(|d| PyStyleDefinition::from_definition(d.clone()))
        .collect())
}

/// Resolve a class token used in a template to its style definitions
///
/// Args:
///     query (str): Class name without the leading dot
///     template_path (str): Template the class is used in
///     workspace_root (str | None): Root for global style files
///
/// Returns:
///     list[ClassLocation]: Exact matches, or BEM ancestors when there are none
#[pyfunction]
#[pyo3(signature = (query, template_path, workspace_root=None))]
pub fn resolve_class_definition(
    query: &str,
    template_path: &str,
    workspace_root: Option<&str>,
) -> PyResult<Vec<PyClassLocation>> {
    let document = TemplateFile::new(template_path, workspace_root.map(PathBuf::from));
    let mut engine = engine()?;

    Ok(engine
        .resolve_class_definition(query, &document, Position::default(), None)
        .into_iter()
        .map(PyClassLocation::from_location)
        .collect())
}

/// Replace the lookup configuration; omitted arguments keep their current value
#[pyfunction]
#[pyo3(signature = (style_extensions=None, global_style_files=None))]
pub fn configure(
    style_extensions: Option<Vec<String>>,
    global_style_files: Option<Vec<String>>,
) -> PyResult<()> {
    let mut engine = engine()?;
    let mut config = engine.config().clone();

    if let Some(extensions) = style_extensions {
        config.style_extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
    }
    if let Some(globals) = global_style_files {
        config.global_style_files = globals;
    }

    engine.set_config(config);
    Ok(())
}

/// Detect the style dialect from a file extension
///
/// Returns:
///     str: "css", "wxss", "scss", "less" or "unknown"
#[pyfunction]
#[pyo3(signature = (path))]
pub fn detect_dialect(path: &str) -> String {
    StyleDialect::from_path(Path::new(path)).to_string()
}

/// Register unsaved editor text for a style file
#[pyfunction]
#[pyo3(signature = (path, text))]
pub fn open_buffer(path: &str, text: &str) -> PyResult<()> {
    engine()?.source_mut().open_buffer(path, text);
    Ok(())
}

/// Drop unsaved editor text; later lookups read the file from disk again
#[pyfunction]
#[pyo3(signature = (path))]
pub fn close_buffer(path: &str) -> PyResult<bool> {
    Ok(engine()?.source_mut().close_buffer(Path::new(path)).is_some())
}
