// CSS Extractor Helpers - Rule node navigation

use super::selectors::split_selector_list;
use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

pub(super) struct RuleHelper;

impl RuleHelper {
    /// Find the first direct child of a given kind
    #[allow(clippy::manual_find)]
    pub(super) fn find_child<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == kind {
                return Some(child);
            }
        }
        None
    }

    /// Find the body block of a rule
    pub(super) fn find_block<'a>(rule: &Node<'a>) -> Option<Node<'a>> {
        Self::find_child(rule, "block")
    }

    /// Raw selector alternatives of a rule, one per comma-separated entry
    ///
    /// Uses the grammar's selector list. When error recovery left no clean
    /// `selectors` node, the text before the body is split instead.
    pub(super) fn selector_alternatives(base: &BaseExtractor, rule: &Node) -> Vec<String> {
        if let Some(selectors) = Self::find_child(rule, "selectors") {
            if !selectors.has_error() {
                let mut cursor = selectors.walk();
                let alternatives: Vec<String> = selectors
                    .named_children(&mut cursor)
                    .filter(|child| child.kind() != "comment")
                    .map(|child| base.get_node_text(&child))
                    .filter(|text| !text.trim().is_empty())
                    .collect();
                if !alternatives.is_empty() {
                    return alternatives;
                }
            }
        }

        split_selector_list(&Self::prelude_text(base, rule))
    }

    /// Whether a node is the stray `&` tree-sitter-css leaves before a
    /// nested suffix rule such as `&__item` or `&--mod`
    ///
    /// The grammar cannot attach a bare identifier to `&`, so it emits
    /// `ERROR (nesting_selector)` followed by a `rule_set` whose selector is
    /// the suffix alone.
    pub(super) fn is_nesting_prefix(node: &Node) -> bool {
        if !node.is_error() || node.named_child_count() == 0 {
            return false;
        }
        let mut cursor = node.walk();
        let all_nesting = node
            .named_children(&mut cursor)
            .all(|child| child.kind() == "nesting_selector");
        all_nesting
    }

    /// Whether a subtree has syntax errors besides nesting prefixes
    pub(super) fn has_unrecovered_error(node: &Node) -> bool {
        if Self::is_nesting_prefix(node) {
            return false;
        }
        if node.is_error() || node.is_missing() {
            return true;
        }
        if !node.has_error() {
            return false;
        }
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|child| Self::has_unrecovered_error(&child));
        found
    }

    /// Selector alternatives of a rule split off from its nesting prefix
    ///
    /// The prelude is read from the prefix start so `&` and the suffix are
    /// rejoined into one selector.
    pub(super) fn prefixed_alternatives(
        base: &BaseExtractor,
        prefix: &Node,
        rule: &Node,
    ) -> Vec<String> {
        split_selector_list(&Self::prelude_from(base, prefix.start_byte(), rule))
    }

    /// Text between the rule start and its body (or up to the first `{`)
    fn prelude_text(base: &BaseExtractor, rule: &Node) -> String {
        Self::prelude_from(base, rule.start_byte(), rule)
    }

    fn prelude_from(base: &BaseExtractor, start: usize, rule: &Node) -> String {
        let end = Self::find_block(rule)
            .map(|block| block.start_byte())
            .unwrap_or_else(|| rule.end_byte());
        let text = base.content.get(start..end).unwrap_or_default();
        match text.find('{') {
            Some(brace) => text[..brace].to_string(),
            None => text.to_string(),
        }
    }
}
