// Stylejump Path Utilities
//
// Resolution of configured style paths against the workspace root, and
// compact relative paths for log output.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Resolve a configured path against the workspace root
///
/// Absolute entries are kept; relative ones are joined to `workspace_root`.
/// `.` and `..` components are folded lexically so the result can be used
/// as a stable cache key even when the file does not exist.
pub fn resolve_against_root(entry: &str, workspace_root: &Path) -> PathBuf {
    let entry_path = Path::new(entry);
    let joined = if entry_path.is_absolute() {
        entry_path.to_path_buf()
    } else {
        workspace_root.join(entry_path)
    };
    normalize_lexically(&joined)
}

/// Fold `.` and `..` components without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether a configured entry should be expanded as a glob pattern
pub fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Convert an absolute path to a relative Unix-style path (with `/` separators)
///
/// # Examples
/// ```text
/// // Linux/macOS
/// to_relative_unix_style("/home/dev/app/styles/app.wxss", "/home/dev/app")
/// // => "styles/app.wxss"
/// ```
pub fn to_relative_unix_style(absolute: &Path, workspace_root: &Path) -> Result<String> {
    let relative = absolute.strip_prefix(workspace_root).with_context(|| {
        format!(
            "File path '{}' is not within workspace root '{}'",
            absolute.display(),
            workspace_root.display()
        )
    })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    // On Unix, MAIN_SEPARATOR is already '/', so this is a no-op
    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Path for log output: relative to the root when possible, else as-is
pub fn display_path(path: &Path, workspace_root: Option<&Path>) -> String {
    workspace_root
        .and_then(|root| to_relative_unix_style(path, root).ok())
        .unwrap_or_else(|| path.display().to_string())
}
