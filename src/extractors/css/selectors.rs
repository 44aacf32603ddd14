// CSS Extractor Selectors - Parent-reference expansion and class token extraction

use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.[A-Za-z][A-Za-z0-9_-]*").expect("class token pattern must compile")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Parent-reference marker used by nested rules
pub const PARENT_REFERENCE: char = '&';

/// Expand one selector alternative against the enclosing rule's selectors
///
/// Whitespace runs collapse to a single space. A selector without `&`, or one
/// with no parents, is returned as-is. Otherwise one selector is produced per
/// parent, in parent order, with every `&` replaced by that parent.
pub fn normalize_selector(raw: &str, parents: &[String]) -> Vec<String> {
    let selector = WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned();

    if parents.is_empty() || !selector.contains(PARENT_REFERENCE) {
        return vec![selector];
    }

    parents
        .iter()
        .map(|parent| selector.replace(PARENT_REFERENCE, parent))
        .collect()
}

/// Expand every alternative of a selector list, concatenating in order
pub fn normalize_selectors<S: AsRef<str>>(alternatives: &[S], parents: &[String]) -> Vec<String> {
    alternatives
        .iter()
        .flat_map(|alt| normalize_selector(alt.as_ref(), parents))
        .collect()
}

/// Class names referenced by a selector, leading `.` stripped, in order
pub fn extract_class_names(selector: &str) -> Vec<String> {
    CLASS_TOKEN
        .find_iter(selector)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// Whether a selector targets a pseudo-element rather than its base class
pub fn is_pseudo_element_selector(selector: &str) -> bool {
    selector.contains("::") || selector.contains(":before") || selector.contains(":after")
}

/// Split a raw selector list on commas that are not nested in (), [] or quotes
///
/// Only used when the parser could not produce a clean selector list for a rule.
pub fn split_selector_list(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in raw.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }

        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
