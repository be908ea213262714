//! Async file utilities for blogstat.
//!
//! Provides post discovery (recursive walk filtered by a glob relative to the
//! content root) and file reading.

use async_walkdir::WalkDir;
use futures::StreamExt;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::traits::DEFAULT_CONTENT_GLOB;
use crate::{Error, Result};

/// Options for discovering files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Glob matched against the path relative to the search base.
    pub pattern: Option<Pattern>,
    /// Maximum directory depth to search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Options for finding markdown posts (`**/*.md`).
    pub fn markdown() -> Self {
        Self {
            pattern: Pattern::new(DEFAULT_CONTENT_GLOB).ok(),
            max_depth: None,
        }
    }

    /// Options for an arbitrary glob.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `glob` is not a valid pattern.
    pub fn with_glob(glob: &str) -> Result<Self> {
        let pattern = Pattern::new(glob)
            .map_err(|e| Error::config(format!("invalid content glob '{glob}': {e}")))?;
        Ok(Self {
            pattern: Some(pattern),
            max_depth: None,
        })
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn accepts(&self, relative: &Path) -> bool {
        if let Some(max_depth) = self.max_depth {
            if relative.components().count() > max_depth {
                return false;
            }
        }
        match &self.pattern {
            Some(pattern) => pattern.matches_path(relative),
            None => true,
        }
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory.
///
/// Results are sorted by relative path so that positional selection is
/// stable between runs.
///
/// # Example
///
/// ```no_run
/// # use blogstat_core::util::files::{find_all_files, FindOptions};
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let posts = find_all_files(Path::new("blogposts"), FindOptions::markdown()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "content directory {} does not exist",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result
            .map_err(|e| Error::operation(format!("walking {}: {e}", base_path.display())))?;
        let path = entry.path();

        // Skip directories
        if path.is_dir() {
            continue;
        }

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();
        if !options.accepts(&relative_path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        files.push(FileInfo {
            path: path.to_path_buf(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!(
        "discovered {} file(s) under {}",
        files.len(),
        base_path.display()
    );
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
