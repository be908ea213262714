//! Post discovery and selection.
//!
//! The catalog is the sorted list of posts under the content root. A
//! selection names one of them by 1-based list number, by path (relative to
//! the content root or on disk), or by file stem.

use std::path::{Path, PathBuf};

use blogstat_content::load_document;
use blogstat_core::{ConfigProvider, Error, FileInfo, FindOptions, Result, find_all_files};

/// One line of the post listing.
#[derive(Debug)]
pub struct ListingEntry {
    /// 1-based list number.
    pub number: usize,
    /// Path relative to the content root.
    pub relative_path: PathBuf,
    /// Post title, or the load error in its place.
    pub title: Result<String>,
}

/// Posts discovered under the content root.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root: PathBuf,
    posts: Vec<FileInfo>,
}

impl Catalog {
    /// Discover posts using the configured content path and glob.
    pub async fn discover<C: ConfigProvider>(config: &C) -> Result<Self> {
        let root = config.content_path()?;
        let options = FindOptions::with_glob(config.content_glob())?;
        let posts = find_all_files(&root, options).await?;
        log::info!("found {} post(s) under {}", posts.len(), root.display());
        Ok(Self { root, posts })
    }

    /// Catalog over an already-discovered list, kept in the given order.
    pub fn from_files(root: impl Into<PathBuf>, posts: Vec<FileInfo>) -> Self {
        Self {
            root: root.into(),
            posts,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn posts(&self) -> &[FileInfo] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Every post as a selection string, in list order.
    pub fn all_selections(&self) -> Vec<String> {
        (1..=self.posts.len()).map(|n| n.to_string()).collect()
    }

    /// Resolve a selection to a file path.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when nothing matches, [`Error::InvalidData`] when
    /// a stem matches more than one post.
    pub fn resolve(&self, selection: &str) -> Result<PathBuf> {
        let selection = selection.trim();
        if selection.is_empty() {
            return Err(Error::invalid_data("empty selection"));
        }

        if let Ok(number) = selection.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|i| self.posts.get(i))
                .map(|post| post.path.clone())
                .ok_or_else(|| {
                    Error::not_found(format!(
                        "no post numbered {number} (choose 1-{})",
                        self.posts.len()
                    ))
                });
        }

        let as_path = Path::new(selection);
        if let Some(post) = self
            .posts
            .iter()
            .find(|p| p.relative_path == as_path || p.path == as_path)
        {
            return Ok(post.path.clone());
        }
        if as_path.is_file() {
            return Ok(as_path.to_path_buf());
        }

        let mut by_stem = self.posts.iter().filter(|p| p.stem == selection);
        match (by_stem.next(), by_stem.next()) {
            (Some(post), None) => Ok(post.path.clone()),
            (Some(_), Some(_)) => Err(Error::invalid_data(format!(
                "'{selection}' matches more than one post; use its path or number"
            ))),
            (None, _) => Err(Error::not_found(format!("no post matches '{selection}'"))),
        }
    }

    /// Load every post's title for display, keeping load errors in place.
    pub async fn listing(&self) -> Vec<ListingEntry> {
        let mut entries = Vec::with_capacity(self.posts.len());
        for (i, post) in self.posts.iter().enumerate() {
            let title = load_document(&post.path).await.map(|doc| doc.title);
            if let Err(e) = &title {
                log::warn!("{e}");
            }
            entries.push(ListingEntry {
                number: i + 1,
                relative_path: post.relative_path.clone(),
                title,
            });
        }
        entries
    }
}
