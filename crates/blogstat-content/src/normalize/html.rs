//! HTML element removal.
//!
//! A tolerant scanner in the spirit of lenient HTML parsers: it recognises
//! start tags, end tags, comments, declarations and processing instructions,
//! tracks which elements are open, and keeps only the text that sits outside
//! every element. Element content is dropped along with the tags.
//!
//! Anything that does not form a complete tag (a lone `<`, `a < b`, a tag
//! without its closing `>`) is ordinary text.

use quick_xml::escape::resolve_html5_entity;
use std::borrow::Cow;

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr",
    "image", "img", "input", "isindex", "keygen", "link", "menuitem", "meta", "nextid", "param",
    "source", "spacer", "track", "wbr",
];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, PartialEq, Eq)]
enum Markup {
    Start { name: String, self_closing: bool },
    End { name: String },
    /// Comment, declaration or processing instruction.
    Ignored,
}

fn is_name_end(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\x0c' | ' ' | '/' | '>' | '\0')
}

/// Split `<name ...>` at `start` (pointing just past `<` or `</`) into the
/// lowercased name and the byte offset just past the closing `>`.
///
/// Quoted attribute values (after `=`) may contain `>`.
fn scan_tag(text: &str, start: usize) -> Option<(String, usize, bool)> {
    let rest = &text[start..];
    let name_len = rest.find(is_name_end).unwrap_or(rest.len());
    let name = rest[..name_len].to_ascii_lowercase();

    let mut after_eq = false;
    let mut quote: Option<char> = None;
    let mut last_significant = None;

    for (i, c) in rest[name_len..].char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '>' => {
                let end = start + name_len + i + 1;
                return Some((name, end, last_significant == Some('/')));
            }
            '"' | '\'' if after_eq => {
                quote = Some(c);
                after_eq = false;
            }
            '=' => after_eq = true,
            c if c.is_whitespace() => {}
            _ => after_eq = false,
        }
        if !c.is_whitespace() {
            last_significant = Some(c);
        }
    }

    None
}

/// Recognise markup beginning at the `<` at byte offset `lt`.
///
/// Returns the markup and the offset just past it, or `None` when the `<`
/// is literal text.
fn scan_markup(text: &str, lt: usize) -> Option<(Markup, usize)> {
    let rest = &text[lt..];

    if rest.starts_with("<!--") {
        let end = rest[4..]
            .find("-->")
            .map(|i| lt + 4 + i + 3)
            .unwrap_or(text.len());
        return Some((Markup::Ignored, end));
    }

    let mut chars = rest.chars().skip(1);
    match chars.next()? {
        '!' | '?' => {
            let end = rest.find('>')?;
            Some((Markup::Ignored, lt + end + 1))
        }
        '/' => {
            if !chars.next()?.is_ascii_alphabetic() {
                return None;
            }
            let (name, end, _) = scan_tag(text, lt + 2)?;
            Some((Markup::End { name }, end))
        }
        c if c.is_ascii_alphabetic() => {
            let (name, end, self_closing) = scan_tag(text, lt + 1)?;
            Some((Markup::Start { name, self_closing }, end))
        }
        _ => None,
    }
}

/// Find the start of `</name` (case-insensitive) at or after `from`.
fn find_raw_text_end(text: &str, from: usize, name: &str) -> Option<usize> {
    let needle = format!("</{name}");
    text[from..]
        .to_ascii_lowercase()
        .find(&needle)
        .map(|i| from + i)
}

/// Longest HTML5 entity name (`CounterClockwiseContourIntegral`) plus slack.
const MAX_REFERENCE_LEN: usize = 32;

/// Decode named (HTML5) and numeric character references.
///
/// Only references terminated by `;` are decoded. Unknown or malformed
/// references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        let decoded = candidate
            .find(';')
            .filter(|&semi| semi > 0 && semi <= MAX_REFERENCE_LEN)
            .and_then(|semi| decode_reference(&candidate[..semi]).map(|r| (r, semi)));

        match decoded {
            Some((replacement, semi)) => {
                out.push_str(&replacement);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<Cow<'static, str>> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(name).map(Cow::Borrowed)
}

/// Remove every HTML element, tags and content alike.
///
/// Only text outside all elements survives, with character references
/// decoded. Elements left open run to the end of the input.
pub fn strip_html_elements(text: &str) -> String {
    if !text.contains('<') {
        return decode_entities(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut open: Vec<String> = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while let Some(off) = text[pos..].find('<') {
        let lt = pos + off;
        let Some((markup, end)) = scan_markup(text, lt) else {
            pos = lt + 1;
            continue;
        };

        if open.is_empty() {
            out.push_str(&decode_entities(&text[text_start..lt]));
        }
        pos = end;

        match markup {
            Markup::Start { name, self_closing } => {
                if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                        pos = find_raw_text_end(text, end, &name).unwrap_or(text.len());
                    }
                    open.push(name);
                }
            }
            Markup::End { name } => {
                if let Some(idx) = open.iter().rposition(|n| *n == name) {
                    open.truncate(idx);
                }
            }
            Markup::Ignored => {}
        }

        text_start = pos;
    }

    if open.is_empty() {
        out.push_str(&decode_entities(&text[text_start..]));
    } else {
        log::trace!("{} HTML element(s) left open at end of input", open.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_element_and_content() {
        assert_eq!(strip_html_elements("keep <b>bold</b> this"), "keep  this");
    }

    #[test]
    fn test_removes_nested_elements() {
        let input = "a<div><p>one <em>two</em></p> three</div>b";
        assert_eq!(strip_html_elements(input), "ab");
    }

    #[test]
    fn test_attributes_with_gt_in_quotes() {
        let input = r#"x<a title="1 > 0" href='/y'>link</a>z"#;
        assert_eq!(strip_html_elements(input), "xz");
    }

    #[test]
    fn test_apostrophe_in_bare_attribute() {
        assert_eq!(strip_html_elements("a<p don't>x</p>b"), "ab");
    }

    #[test]
    fn test_void_elements_are_empty() {
        assert_eq!(
            strip_html_elements("line<br>next<img src=\"a.png\">end"),
            "linenextend"
        );
    }

    #[test]
    fn test_self_closing() {
        assert_eq!(strip_html_elements("a<widget/>b<x y=\"1\" />c"), "abc");
    }

    #[test]
    fn test_case_insensitive_end_tag() {
        assert_eq!(strip_html_elements("a<DIV>x</div>b"), "ab");
    }

    #[test]
    fn test_end_tag_closes_intermediate_elements() {
        assert_eq!(strip_html_elements("a<div><span>x</div>b"), "ab");
    }

    #[test]
    fn test_stray_end_tag_dropped() {
        assert_eq!(strip_html_elements("a</p>b"), "ab");
    }

    #[test]
    fn test_unclosed_element_runs_to_end() {
        assert_eq!(strip_html_elements("keep<section>gone forever"), "keep");
    }

    #[test]
    fn test_script_content_is_raw() {
        let input = "a<script>if (x < y) { w('<b>') }</script>b";
        assert_eq!(strip_html_elements(input), "ab");
    }

    #[test]
    fn test_style_uppercase_end() {
        assert_eq!(strip_html_elements("a<style>p{}</STYLE>b"), "ab");
    }

    #[test]
    fn test_comments_and_declarations() {
        let input = "<!DOCTYPE html>a<!-- hidden <b>x</b> -->b<?xml version=\"1.0\"?>c";
        assert_eq!(strip_html_elements(input), "abc");
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(strip_html_elements("a<!-- never closed"), "a");
    }

    #[test]
    fn test_literal_less_than() {
        assert_eq!(strip_html_elements("1 < 2 and 3<4"), "1 < 2 and 3<4");
    }

    #[test]
    fn test_incomplete_tag_is_text() {
        assert_eq!(strip_html_elements("a <b no close"), "a <b no close");
    }

    #[test]
    fn test_end_tag_needs_letter() {
        assert_eq!(strip_html_elements("a </ b"), "a </ b");
    }

    #[test]
    fn test_entities_decoded_outside_elements() {
        assert_eq!(
            strip_html_elements("Tom &amp; Jerry &lt;3 <i>&amp;</i>"),
            "Tom & Jerry <3 "
        );
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
    }

    #[test]
    fn test_decode_html5_named_entities() {
        assert_eq!(
            decode_entities("Fast &mdash; really &hellip; &copy; 2021 &rsquo;s"),
            "Fast \u{2014} really \u{2026} \u{a9} 2021 \u{2019}s"
        );
        assert_eq!(decode_entities("&nbsp;&apos;&quot;"), "\u{a0}'\"");
    }

    #[test]
    fn test_entity_names_are_case_sensitive() {
        assert_eq!(decode_entities("&Dagger;&dagger;&DAGGER;"), "\u{2021}\u{2020}&DAGGER;");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(decode_entities("a &bogus; b & c"), "a &bogus; b & c");
    }

    #[test]
    fn test_no_markup_passthrough() {
        let input = "Plain prose.\n\nSecond paragraph.";
        assert_eq!(strip_html_elements(input), input);
    }

    #[test]
    fn test_empty() {
        assert_eq!(strip_html_elements(""), "");
    }
}
