//! YAML frontmatter extraction.
//!
//! A post may begin with a header block delimited by lines of three or more
//! dashes:
//!
//! ```text
//! ---
//! title: Announcing the thing
//! author: someone
//! ---
//!
//! Body text.
//! ```
//!
//! The whole document is trimmed before splitting. A document that does not
//! start with a delimiter line, or whose header is never closed, has no
//! frontmatter and is all body.

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::collections::BTreeMap;

use blogstat_core::{Error, Result};

/// Result of splitting a document into frontmatter and body.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterResult {
    /// Parsed header, present only when it is a YAML mapping.
    pub frontmatter: Option<Value>,
    /// Document body with surrounding whitespace trimmed.
    pub body: String,
}

impl FrontmatterResult {
    /// True when a mapping header was found.
    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }

    /// Look up a scalar header field and render it as a string.
    ///
    /// Strings are returned as-is; numbers and booleans are formatted.
    /// Missing, null, sequence and mapping values yield `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.frontmatter
            .as_ref()
            .and_then(|fm| fm.get(key))
            .and_then(scalar_to_string)
    }

    /// All scalar header fields as strings, keyed by field name.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let Some(Value::Mapping(map)) = &self.frontmatter else {
            return BTreeMap::new();
        };
        map.iter()
            .filter_map(|(k, v)| Some((scalar_to_string(k)?, scalar_to_string(v)?)))
            .collect()
    }

    /// Deserialize the header into a domain type.
    ///
    /// Returns `Ok(None)` when there is no header.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.frontmatter {
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::serialization(e.to_string())),
            None => Ok(None),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_delimiter(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.bytes().all(|b| b == b'-')
}

/// Split `content` into YAML frontmatter and body.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] when the header is present but is not
/// valid YAML.
///
/// # Example
///
/// ```
/// use blogstat_content::markdown::extract_frontmatter;
///
/// let result = extract_frontmatter("---\ntitle: Hello\n---\n\nBody").unwrap();
/// assert_eq!(result.get_str("title").as_deref(), Some("Hello"));
/// assert_eq!(result.body, "Body");
/// ```
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterResult> {
    let text = content.trim_start_matches('\u{feff}').trim();

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(FrontmatterResult::default());
    };
    if !is_delimiter(first) {
        return Ok(unheaded(text));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if is_delimiter(line) {
            let yaml = &text[header_start..offset];
            let body = text[offset + line.len()..].trim().to_string();
            return Ok(FrontmatterResult {
                frontmatter: parse_header(yaml)?,
                body,
            });
        }
        offset += line.len();
    }

    log::debug!("frontmatter header never closed; treating document as body");
    Ok(unheaded(text))
}

fn unheaded(text: &str) -> FrontmatterResult {
    FrontmatterResult {
        frontmatter: None,
        body: text.to_string(),
    }
}

fn parse_header(yaml: &str) -> Result<Option<Value>> {
    if yaml.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| Error::invalid_data(format!("invalid YAML frontmatter: {e}")))?;
    Ok(match value {
        Value::Mapping(_) => Some(value),
        _ => None,
    })
}

/// Return the body of `content` with any frontmatter removed.
pub fn strip_frontmatter(content: &str) -> Result<String> {
    Ok(extract_frontmatter(content)?.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_basic_header() {
        let result = extract_frontmatter("---\ntitle: Hello\ntags: [a, b]\n---\nBody here").unwrap();
        assert!(result.has_frontmatter());
        assert_eq!(result.get_str("title").as_deref(), Some("Hello"));
        assert_eq!(result.get_str("tags"), None);
        assert_eq!(result.body, "Body here");
    }

    #[test]
    fn test_body_is_trimmed() {
        let result = extract_frontmatter("\n\n---\ntitle: T\n---\n\n\n  Body\n\n").unwrap();
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn test_no_header() {
        let result = extract_frontmatter("# Heading\n\nText").unwrap();
        assert!(!result.has_frontmatter());
        assert_eq!(result.body, "# Heading\n\nText");
    }

    #[test]
    fn test_unclosed_header_is_body() {
        let input = "---\ntitle: Broken\nno closing line";
        let result = extract_frontmatter(input).unwrap();
        assert!(!result.has_frontmatter());
        assert_eq!(result.body, input);
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let result = extract_frontmatter("---\ntitle: [unclosed\n---\nBody");
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_header() {
        let result = extract_frontmatter("---\n---\nBody").unwrap();
        assert!(!result.has_frontmatter());
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn test_non_mapping_header_ignored() {
        let result = extract_frontmatter("---\n- a\n- b\n---\nBody").unwrap();
        assert!(!result.has_frontmatter());
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn test_long_delimiters_and_trailing_space() {
        let result = extract_frontmatter("-----  \ntitle: X\n---- \nBody").unwrap();
        assert_eq!(result.get_str("title").as_deref(), Some("X"));
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn test_dashes_inside_body_kept() {
        let result = extract_frontmatter("---\ntitle: X\n---\nabove\n---\nbelow").unwrap();
        assert_eq!(result.body, "above\n---\nbelow");
    }

    #[test]
    fn test_scalar_metadata() {
        let result =
            extract_frontmatter("---\ntitle: X\nyear: 2021\ndraft: false\nauthors: [a]\n---\n")
                .unwrap();
        let meta = result.metadata();
        assert_eq!(meta.get("title").map(String::as_str), Some("X"));
        assert_eq!(meta.get("year").map(String::as_str), Some("2021"));
        assert_eq!(meta.get("draft").map(String::as_str), Some("false"));
        assert!(!meta.contains_key("authors"));
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Meta {
            title: String,
            author: Option<String>,
        }

        let result = extract_frontmatter("---\ntitle: Typed\n---\nBody").unwrap();
        let meta: Meta = result.deserialize().unwrap().unwrap();
        assert_eq!(meta.title, "Typed");
        assert!(meta.author.is_none());
    }

    #[test]
    fn test_strip_frontmatter() {
        assert_eq!(strip_frontmatter("---\na: 1\n---\nrest").unwrap(), "rest");
    }

    #[test]
    fn test_empty_document() {
        let result = extract_frontmatter("").unwrap();
        assert!(!result.has_frontmatter());
        assert_eq!(result.body, "");
    }
}
