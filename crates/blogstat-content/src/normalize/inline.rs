//! Inline markup removal: link targets, bare URLs, and leftover punctuation.

use regex::Regex;
use std::sync::LazyLock;

/// A parenthesised group with at least one character, which may span lines.
static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("PAREN_GROUP is a valid regex"));

/// `http` followed by a run of non-whitespace.
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+").expect("URL is a valid regex"));

/// Characters left behind by links, images and inline code.
const MARKDOWN_PUNCTUATION: &[char] = &['`', '[', ']', '!'];

/// Remove every `(...)` group.
///
/// Collapses `[text](url)` targets, but also any other parenthetical.
pub fn strip_link_targets(text: &str) -> String {
    PAREN_GROUP.replace_all(text, "").into_owned()
}

/// Remove every `http...` run up to the next whitespace.
pub fn strip_urls(text: &str) -> String {
    URL.replace_all(text, "").into_owned()
}

/// Delete backticks, square brackets and exclamation marks.
pub fn strip_markdown_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKDOWN_PUNCTUATION.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_target_removed() {
        assert_eq!(
            strip_link_targets("see [docs](https://x.dev/a) now"),
            "see [docs] now"
        );
    }

    #[test]
    fn test_prose_parenthetical_also_removed() {
        assert_eq!(strip_link_targets("a (quiet) aside"), "a  aside");
    }

    #[test]
    fn test_empty_parens_kept() {
        assert_eq!(strip_link_targets("call f() here"), "call f() here");
    }

    #[test]
    fn test_group_spans_newlines() {
        assert_eq!(strip_link_targets("a (one\ntwo) b"), "a  b");
    }

    #[test]
    fn test_nested_parens_stop_at_first_close() {
        assert_eq!(strip_link_targets("x (a (b) c) y"), "x  c) y");
    }

    #[test]
    fn test_urls_removed() {
        assert_eq!(
            strip_urls("visit https://example.com/path?q=1 today"),
            "visit  today"
        );
    }

    #[test]
    fn test_url_mid_token() {
        assert_eq!(strip_urls("<http://a.b>"), "<");
    }

    #[test]
    fn test_bare_http_word_kept() {
        assert_eq!(strip_urls("plain http is old"), "plain http is old");
    }

    #[test]
    fn test_punctuation_removed() {
        assert_eq!(
            strip_markdown_punctuation("Wow! `code` and [link]"),
            "Wow code and link"
        );
    }

    #[test]
    fn test_punctuation_leaves_other_characters() {
        let input = "a, b; c: d? (e) {f} <g>";
        assert_eq!(strip_markdown_punctuation(input), input);
    }
}
