// CSS Extractor Ranges - Selector declaration spans
//
// A jump target covers the selector text only, so landing on a BEM modifier
// does not highlight the rule body or its nested rules.

use crate::extractors::base::{Position, SelectorRange};

/// Line/column of a byte offset in `content`
///
/// The line is the number of newlines before the offset; the column is the
/// byte distance from the last newline.
pub fn position_at(content: &str, byte_offset: usize) -> Position {
    let offset = byte_offset.min(content.len());
    let before = &content.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count();
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(newline) => offset - newline - 1,
        None => offset,
    };
    Position::new(line as u32, column as u32)
}

/// Span from the rule start to just before its opening `{`
///
/// `rule_text` must appear verbatim in `content` at or after
/// `rule_start_byte`. Returns `None` when it does not, or when no `{` follows;
/// the caller then uses the rule's full span.
pub fn resolve_selector_range(
    rule_start_byte: usize,
    rule_text: &str,
    content: &str,
) -> Option<SelectorRange> {
    if rule_text.is_empty() {
        return None;
    }

    let search_area = content.get(rule_start_byte..)?;
    let rule_offset = rule_start_byte + search_area.find(rule_text)?;
    let brace_offset = rule_offset + content[rule_offset..].find('{')?;

    Some(SelectorRange {
        start: position_at(content, rule_offset),
        end: position_at(content, brace_offset),
    })
}
