// CSS Extractor - Class definition table for CSS, WXSS, SCSS and LESS files
//
// Walks tree-sitter-css rule sets, rebuilds fully qualified selectors for
// nested `&` rules, and emits one StyleDefinition per class name, first
// occurrence wins.

mod comments;
mod helpers;
mod ranges;
mod selectors;

pub use comments::{extract_comments, lookup_doc_comment, mask_line_comments};
pub use ranges::{position_at, resolve_selector_range};
pub use selectors::{
    extract_class_names, is_pseudo_element_selector, normalize_selector, normalize_selectors,
    split_selector_list,
};

use crate::errors::{StyleError, StyleResult};
use crate::extractors::base::{BaseExtractor, SelectorRange, StyleDefinition, StyleFileResult};
use crate::language::{create_parser, StyleDialect};
use helpers::RuleHelper;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

pub struct StyleExtractor {
    base: BaseExtractor,
    dialect: StyleDialect,
    comments: BTreeMap<usize, String>,
}

impl StyleExtractor {
    pub fn new(file_path: &Path, content: String, workspace_root: &Path) -> Self {
        let dialect = StyleDialect::from_path(file_path);
        let content = if dialect.has_line_comments() {
            mask_line_comments(&content)
        } else {
            content
        };
        let comments = extract_comments(&content);

        Self {
            base: BaseExtractor::new(file_path, content, workspace_root),
            dialect,
            comments,
        }
    }

    pub fn dialect(&self) -> StyleDialect {
        self.dialect
    }

    /// Parse the content with the dialect's grammar
    pub fn parse(&self) -> StyleResult<Tree> {
        let mut parser = create_parser(self.dialect)?;
        let tree = parser
            .parse(&self.base.content, None)
            .ok_or_else(|| StyleError::Parse {
                path: self.base.file_path.clone(),
            })?;

        if RuleHelper::has_unrecovered_error(&tree.root_node()) {
            // Recovered regions are still walked; only unrecognised syntax is lost
            warn!(
                "Style file '{}' contains syntax tree-sitter could not parse",
                self.base.file_path.display()
            );
        }

        Ok(tree)
    }

    /// Build the definition table for a parsed tree
    pub fn extract_definitions(&self, tree: &Tree) -> Vec<StyleDefinition> {
        let mut definitions = Vec::new();
        let mut seen = HashSet::new();
        self.walk(tree.root_node(), &[], &mut seen, &mut definitions);
        definitions
    }

    /// Parse and extract in one step
    pub fn extract(&self) -> StyleResult<StyleFileResult> {
        let tree = self.parse()?;
        let definitions = self.extract_definitions(&tree);

        debug!(
            "Extracted {} class definitions from '{}' ({})",
            definitions.len(),
            self.base.file_path.display(),
            self.dialect
        );

        Ok(StyleFileResult {
            file: self.base.file_path.clone(),
            definitions,
        })
    }

    /// Main tree traversal
    ///
    /// `parents` holds the fully qualified selectors of the enclosing rule.
    /// At-rules and error nodes are descended with the parents unchanged.
    fn walk(
        &self,
        node: Node,
        parents: &[String],
        seen: &mut HashSet<String>,
        definitions: &mut Vec<StyleDefinition>,
    ) {
        match node.kind() {
            "rule_set" => self.visit_rule(node, None, parents, seen, definitions),
            "comment" => {}
            _ => self.walk_children(node, parents, seen, definitions),
        }
    }

    /// Walk the children of a stylesheet, block or at-rule
    ///
    /// A nesting prefix is held until the next `rule_set` and handed to it.
    fn walk_children(
        &self,
        node: Node,
        parents: &[String],
        seen: &mut HashSet<String>,
        definitions: &mut Vec<StyleDefinition>,
    ) {
        let mut nesting_prefix: Option<Node> = None;
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if RuleHelper::is_nesting_prefix(&child) {
                nesting_prefix = Some(child);
                continue;
            }
            match child.kind() {
                "comment" => {}
                "rule_set" => {
                    let prefix = nesting_prefix.take();
                    self.visit_rule(child, prefix, parents, seen, definitions);
                }
                _ => {
                    nesting_prefix = None;
                    self.walk(child, parents, seen, definitions);
                }
            }
        }
    }

    fn visit_rule(
        &self,
        node: Node,
        nesting_prefix: Option<Node>,
        parents: &[String],
        seen: &mut HashSet<String>,
        definitions: &mut Vec<StyleDefinition>,
    ) {
        let alternatives = match &nesting_prefix {
            Some(prefix) => RuleHelper::prefixed_alternatives(&self.base, prefix, &node),
            None => RuleHelper::selector_alternatives(&self.base, &node),
        };
        let selectors = normalize_selectors(&alternatives, parents);

        let head = nesting_prefix.unwrap_or(node);
        let start_byte = head.start_byte();
        let position = self.base.start_position(&head);
        let rule_text = self
            .base
            .content
            .get(start_byte..node.end_byte())
            .unwrap_or_default();
        let selector_range = resolve_selector_range(start_byte, rule_text, &self.base.content)
            .unwrap_or_else(|| {
                debug!(
                    "No selector span for rule at {} in '{}', using full rule span",
                    position,
                    self.base.file_path.display()
                );
                SelectorRange {
                    start: position,
                    end: node.end_position().into(),
                }
            });
        let doc_comment = lookup_doc_comment(&self.comments, position.line as usize + 1);

        for selector in &selectors {
            if is_pseudo_element_selector(selector) {
                continue;
            }

            for name in extract_class_names(selector) {
                if !seen.insert(name.clone()) {
                    continue;
                }
                definitions.push(StyleDefinition {
                    name,
                    position,
                    selector_range: Some(selector_range),
                    doc_comment: doc_comment.clone(),
                    source_file: self.base.file_path.clone(),
                    source_selector: selector.clone(),
                });
            }
        }

        if let Some(block) = RuleHelper::find_block(&node) {
            self.walk_children(block, &selectors, seen, definitions);
        }
    }
}

/// Parse style source text into a definition table
///
/// `file_path` is stored on every definition; relative paths are resolved
/// against the current directory.
pub fn parse_style_source(file_path: &Path, content: String) -> StyleResult<StyleFileResult> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    StyleExtractor::new(file_path, content, &cwd).extract()
}
