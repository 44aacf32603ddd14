//! Class resolver - exact matches first, BEM ancestors as a fallback

use crate::extractors::base::{ClassLocation, MatchKind, StyleDefinition, StyleFileResult};
use std::sync::Arc;
use tracing::debug;

const ELEMENT_SEPARATOR: &str = "__";
const MODIFIER_SEPARATOR: &str = "--";

/// Whether a class name uses BEM element or modifier syntax
pub fn is_bem_compound(name: &str) -> bool {
    name.contains(ELEMENT_SEPARATOR) || name.contains(MODIFIER_SEPARATOR)
}

/// Block name of a BEM compound: text before the first `__` or `--`
pub fn bem_block(name: &str) -> &str {
    let cut = [ELEMENT_SEPARATOR, MODIFIER_SEPARATOR]
        .iter()
        .filter_map(|sep| name.find(sep))
        .min()
        .unwrap_or(name.len());
    &name[..cut]
}

/// Whether `definition` is a BEM ancestor (block, or any element prefix) of `query`
fn is_bem_ancestor(definition: &StyleDefinition, query: &str, block: &str) -> bool {
    let name = definition.name.as_str();
    name == block
        || query.strip_prefix(name).is_some_and(|rest| {
            rest.starts_with(ELEMENT_SEPARATOR) || rest.starts_with(MODIFIER_SEPARATOR)
        })
}

/// Resolve a class token against style files, in file then definition order
///
/// Exact matches are returned alone whenever there is at least one. Only
/// otherwise, and only for BEM compounds, every ancestor definition matches.
pub fn resolve_class(query: &str, files: &[Arc<StyleFileResult>]) -> Vec<ClassLocation> {
    let exact: Vec<ClassLocation> = files
        .iter()
        .flat_map(|file| file.definitions.iter())
        .filter(|definition| definition.name == query)
        .map(|definition| ClassLocation::from_definition(definition, MatchKind::Exact))
        .collect();

    if !exact.is_empty() {
        debug!("'{}' resolved to {} exact definitions", query, exact.len());
        return exact;
    }

    if !is_bem_compound(query) {
        debug!("'{}' has no definition", query);
        return Vec::new();
    }

    let block = bem_block(query);
    let bem: Vec<ClassLocation> = files
        .iter()
        .flat_map(|file| file.definitions.iter())
        .filter(|definition| is_bem_ancestor(definition, query, block))
        .map(|definition| ClassLocation::from_definition(definition, MatchKind::Bem))
        .collect();

    debug!(
        "'{}' resolved to {} BEM ancestor definitions (block '{}')",
        query,
        bem.len(),
        block
    );
    bem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{Position, SelectorRange};
    use std::path::PathBuf;

    fn def(file: &str, name: &str, line: u32) -> StyleDefinition {
        StyleDefinition {
            name: name.to_string(),
            position: Position::new(line, 0),
            selector_range: Some(SelectorRange {
                start: Position::new(line, 0),
                end: Position::new(line, name.len() as u32 + 2),
            }),
            doc_comment: String::new(),
            source_file: PathBuf::from(file),
            source_selector: format!(".{}", name),
        }
    }

    fn file(path: &str, names: &[&str]) -> Arc<StyleFileResult> {
        Arc::new(StyleFileResult {
            file: PathBuf::from(path),
            definitions: names
                .iter()
                .enumerate()
                .map(|(i, name)| def(path, name, i as u32))
                .collect(),
        })
    }

    #[test]
    fn test_bem_block_cuts_at_first_separator() {
        assert_eq!(bem_block("block__elem--mod"), "block");
        assert_eq!(bem_block("block--mod__x"), "block");
        assert_eq!(bem_block("plain"), "plain");
        assert!(is_bem_compound("a__b"));
        assert!(is_bem_compound("a--b"));
        assert!(!is_bem_compound("a-b_c"));
    }

    #[test]
    fn test_exact_matches_across_files_in_order() {
        let files = vec![
            file("/local.wxss", &["card", "title"]),
            file("/global.wxss", &["reset", "card"]),
        ];
        let locs = resolve_class("card", &files);

        assert_eq!(locs.len(), 2);
        assert_eq!(locs[0].file, PathBuf::from("/local.wxss"));
        assert_eq!(locs[1].file, PathBuf::from("/global.wxss"));
        assert_eq!(locs[1].start, Position::new(1, 0));
        assert!(locs.iter().all(|l| l.match_kind == MatchKind::Exact));
    }

    #[test]
    fn test_exact_matches_are_never_mixed_with_bem() {
        let files = vec![file("/a.wxss", &["block", "block__elem"])];
        let locs = resolve_class("block__elem", &files);

        assert_eq!(locs.len(), 1);
        assert_eq!(locs[0].match_kind, MatchKind::Exact);
    }

    #[test]
    fn test_bem_fallback_to_block() {
        let files = vec![file("/a.wxss", &["header", "block"])];
        let locs = resolve_class("block__elem--mod", &files);

        assert_eq!(locs.len(), 1);
        assert_eq!(locs[0].match_kind, MatchKind::Bem);
        assert_eq!(locs[0].start, Position::new(1, 0));
        assert_eq!(locs[0].end, Position::new(1, 7));
    }

    #[test]
    fn test_bem_fallback_matches_every_ancestor() {
        let files = vec![
            file("/a.wxss", &["block", "block__a", "block__ab", "other"]),
            file("/b.wxss", &["block__a__b"]),
        ];
        let names: Vec<_> = resolve_class("block__a__b--x", &files)
            .iter()
            .map(|l| (l.file.clone(), l.start.line))
            .collect();

        // block__ab is not an ancestor: the prefix must end at a separator
        assert_eq!(
            names,
            vec![
                (PathBuf::from("/a.wxss"), 0),
                (PathBuf::from("/a.wxss"), 1),
                (PathBuf::from("/b.wxss"), 0),
            ]
        );
    }

    #[test]
    fn test_plain_name_without_definition_is_empty() {
        let files = vec![file("/a.wxss", &["card", "card-title"])];
        assert!(resolve_class("card-body", &files).is_empty());
        assert!(resolve_class("missing", &[]).is_empty());
    }

    #[test]
    fn test_missing_selector_range_uses_single_column() {
        let mut definition = def("/a.wxss", "card", 3);
        definition.selector_range = None;
        let files = vec![Arc::new(StyleFileResult {
            file: PathBuf::from("/a.wxss"),
            definitions: vec![definition],
        })];

        let locs = resolve_class("card", &files);
        assert_eq!(locs[0].start, Position::new(3, 0));
        assert_eq!(locs[0].end, Position::new(3, 1));
    }
}
