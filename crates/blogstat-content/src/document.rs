//! Blog post loading.
//!
//! A [`Document`] is one post read from disk: its title (from frontmatter)
//! and the raw markdown body that the normalizer consumes. Documents are
//! immutable once loaded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use blogstat_core::{Error, Result, read_file};

use crate::markdown::extract_frontmatter;

/// A loaded blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File the post was read from.
    pub path: PathBuf,
    /// Value of the `title` frontmatter field.
    pub title: String,
    /// Markdown body with the frontmatter removed.
    pub raw_body: String,
    /// Every scalar frontmatter field, rendered as a string.
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Build a document from the full text of a post.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Frontmatter`] when the header is not valid YAML or
    /// has no scalar `title` field.
    pub fn parse(path: impl AsRef<Path>, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let parsed = extract_frontmatter(content).map_err(|e| match e {
            Error::InvalidData(msg) => Error::frontmatter(path, msg),
            other => other,
        })?;

        let title = parsed
            .get_str("title")
            .ok_or_else(|| Error::frontmatter(path, "missing 'title' field"))?;

        Ok(Self {
            path: path.to_path_buf(),
            title,
            metadata: parsed.metadata(),
            raw_body: parsed.body,
        })
    }
}

/// Read and parse the post at `path`.
///
/// # Errors
///
/// A load error: [`Error::IoWithPath`] if the file cannot be read, or
/// [`Error::Frontmatter`] if its header is malformed.
pub async fn load_document(path: &Path) -> Result<Document> {
    let content = read_file(path).await?;
    let doc = Document::parse(path, &content)?;
    log::debug!("loaded '{}' from {}", doc.title, path.display());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(
            "posts/hello.md",
            "---\ntitle: Hello world\nauthor: kim\n---\n\nFirst post.",
        )
        .unwrap();
        assert_eq!(doc.title, "Hello world");
        assert_eq!(doc.raw_body, "First post.");
        assert_eq!(doc.path, PathBuf::from("posts/hello.md"));
        assert_eq!(doc.metadata.get("author").map(String::as_str), Some("kim"));
    }

    #[test]
    fn test_numeric_title() {
        let doc = Document::parse("a.md", "---\ntitle: 1984\n---\nBody").unwrap();
        assert_eq!(doc.title, "1984");
    }

    #[test]
    fn test_missing_title_is_load_error() {
        let err = Document::parse("a.md", "---\nauthor: x\n---\nBody").unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_no_header_is_load_error() {
        let err = Document::parse("a.md", "Just text").unwrap_err();
        assert!(matches!(err, Error::Frontmatter { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_load_error() {
        let err = Document::parse("bad.md", "---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("bad.md"));
    }

    #[tokio::test]
    async fn test_load_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("post.md");
        tokio::fs::write(&path, "---\ntitle: On disk\n---\nBody text")
            .await
            .unwrap();

        let doc = load_document(&path).await.unwrap();
        assert_eq!(doc.title, "On disk");
        assert_eq!(doc.raw_body, "Body text");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_document(&temp.path().join("nope.md")).await.unwrap_err();
        assert!(err.is_load_error());
        assert!(matches!(err, Error::IoWithPath { .. }));
    }
}
