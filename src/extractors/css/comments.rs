// CSS Extractor Comments - Block comment indexing and line comment masking

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)/\*(.*?)\*/").expect("block comment pattern must compile")
});

/// Index every `/* ... */` comment by the 1-based line it starts on
///
/// The value is the trimmed comment body. When several comments start on the
/// same line the last one wins.
pub fn extract_comments(content: &str) -> BTreeMap<usize, String> {
    let mut comments = BTreeMap::new();

    for captures in BLOCK_COMMENT.captures_iter(content) {
        let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let line = content[..whole.start()].matches('\n').count() + 1;
        comments.insert(line, body.as_str().trim().to_string());
    }

    comments
}

/// Doc comment for a rule starting on `rule_line` (1-based)
///
/// Checks the line directly above, then the one above that.
pub fn lookup_doc_comment(comments: &BTreeMap<usize, String>, rule_line: usize) -> String {
    [1, 2]
        .iter()
        .filter_map(|offset| rule_line.checked_sub(*offset))
        .filter_map(|line| comments.get(&line))
        .find(|text| !text.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Blank out `//` line comments, keeping every byte offset and newline intact
///
/// Strings, block comments and parenthesised values such as `url(//cdn/x.png)`
/// are left alone.
pub fn mask_line_comments(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = bytes.to_vec();
    let mut quote: Option<u8> = None;
    let mut in_block = false;
    let mut paren_depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_block {
            if bytes[i..].starts_with(b"*/") {
                in_block = false;
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }

        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q || b == b'\n' {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'/' if bytes[i..].starts_with(b"/*") => {
                in_block = true;
                i += 2;
            }
            b'/' if paren_depth == 0 && bytes[i..].starts_with(b"//") => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out[i] = b' ';
                    i += 1;
                }
            }
            b'"' | b'\'' => {
                quote = Some(b);
                i += 1;
            }
            b'(' => {
                paren_depth += 1;
                i += 1;
            }
            b')' => {
                paren_depth = paren_depth.saturating_sub(1);
                i += 1;
            }
            _ => i += 1,
        }
    }

    // Only whole runs up to an ASCII newline were replaced, so this cannot fail
    String::from_utf8(out).unwrap_or_else(|_| content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_are_keyed_by_one_based_line() {
        let css = "/* Card block */\n.card {}\n\n/*\n  multi\n  line\n*/\n.panel {}\n";
        let comments = extract_comments(css);

        assert_eq!(comments.get(&1).map(String::as_str), Some("Card block"));
        assert_eq!(
            comments.get(&4).map(String::as_str),
            Some("multi\n  line")
        );
        assert_eq!(comments.len(), 2);
    }

    #[test]
    fn test_last_comment_on_a_line_wins() {
        let comments = extract_comments("/* first */ /* second */\n.a {}");
        assert_eq!(comments.get(&1).map(String::as_str), Some("second"));
    }

    #[test]
    fn test_lookup_checks_one_then_two_lines_above() {
        let mut comments = BTreeMap::new();
        comments.insert(3, "two above".to_string());
        comments.insert(10, String::new());
        comments.insert(9, "fallback".to_string());

        assert_eq!(lookup_doc_comment(&comments, 5), "two above");
        assert_eq!(lookup_doc_comment(&comments, 4), "two above");
        // Empty comment directly above falls through to the next line up
        assert_eq!(lookup_doc_comment(&comments, 11), "fallback");
        assert_eq!(lookup_doc_comment(&comments, 7), "");
        assert_eq!(lookup_doc_comment(&comments, 1), "");
    }

    #[test]
    fn test_mask_line_comments_preserves_offsets() {
        let scss = ".a { color: red; } // trailing note\n// whole line\n.b {}\n";
        let masked = mask_line_comments(scss);

        assert_eq!(masked.len(), scss.len());
        assert_eq!(masked.matches('\n').count(), scss.matches('\n').count());
        assert!(!masked.contains("//"));
        assert!(masked.contains(".b {}"));
        assert_eq!(masked.find(".b"), scss.find(".b"));
    }

    #[test]
    fn test_mask_leaves_urls_strings_and_block_comments() {
        let scss = ".a { background: url(//cdn.example.com/x.png); }\n\
                    .b { content: \"//not a comment\"; }\n\
                    /* keep // this */\n";
        assert_eq!(mask_line_comments(scss), scss);
    }
}
