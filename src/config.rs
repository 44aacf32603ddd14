//! Style lookup configuration
//!
//! Mirrors the editor settings the lookup depends on: which sibling style
//! extensions to probe for a template, and which global style files to
//! search for every template.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    /// Extensions probed for a template's sibling style file, first existing wins
    pub style_extensions: Vec<String>,
    /// Style files searched for every template, relative to the workspace root
    /// unless absolute; glob patterns are expanded
    pub global_style_files: Vec<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style_extensions: ["wxss", "css", "less", "scss", "sass", "styl"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            global_style_files: Vec::new(),
        }
    }
}

impl StyleConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StyleConfig =
            serde_json::from_str(json).context("Failed to parse style configuration JSON")?;
        Ok(config.normalized())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read style configuration '{}'", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid style configuration in '{}'", path.display()))
    }

    /// Strip leading dots from extensions and drop empty entries
    fn normalized(mut self) -> Self {
        self.style_extensions = self
            .style_extensions
            .into_iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        self.global_style_files
            .retain(|entry| !entry.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StyleConfig::default();
        assert_eq!(config.style_extensions[0], "wxss");
        assert_eq!(config.style_extensions.len(), 6);
        assert!(config.global_style_files.is_empty());
    }

    #[test]
    fn test_camel_case_keys_and_missing_fields() {
        let config =
            StyleConfig::from_json_str(r#"{ "globalStyleFiles": ["styles/app.wxss"] }"#).unwrap();
        assert_eq!(config.global_style_files, vec!["styles/app.wxss"]);
        assert_eq!(config.style_extensions, StyleConfig::default().style_extensions);
    }

    #[test]
    fn test_extensions_are_normalized() {
        let config =
            StyleConfig::from_json_str(r#"{ "styleExtensions": [".scss", " wxss ", ""] }"#)
                .unwrap();
        assert_eq!(config.style_extensions, vec!["scss", "wxss"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(StyleConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stylejump.json");
        fs::write(&path, r#"{ "styleExtensions": ["less"], "globalStyleFiles": ["a.less"] }"#)
            .unwrap();

        let config = StyleConfig::from_file(&path).unwrap();
        assert_eq!(config.style_extensions, vec!["less"]);
        assert_eq!(config.global_style_files, vec!["a.less"]);

        let missing = StyleConfig::from_file(&dir.path().join("nope.json"));
        assert!(missing.is_err());
    }
}
