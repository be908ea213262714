//! Error types for blogstat operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all blogstat crates. Uses `thiserror` for derive macros.
//!
//! Errors fall into the groups the pipeline cares about:
//!
//! - **Load errors** ([`Error::IoWithPath`], [`Error::Frontmatter`]): a post
//!   could not be read or its header could not be parsed. These abort the
//!   current selection only.
//! - **Engine errors** ([`Error::Engine`]): the annotation engine failed to
//!   initialise. These are fatal at startup.
//! - Everything else (configuration, discovery, serialization).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in blogstat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Frontmatter header is malformed or lacks a required field.
    #[error("Malformed frontmatter in {path}: {message}")]
    Frontmatter {
        /// Post that failed to load.
        path: PathBuf,
        /// What was wrong with the header.
        message: String,
    },

    /// Annotation engine could not be initialised or failed to annotate.
    #[error("Annotation engine error: {0}")]
    Engine(String),

    /// A higher-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a frontmatter error for the given post.
    pub fn frontmatter(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create an annotation engine error.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// True when a post could not be loaded (missing file or bad header).
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::IoWithPath { .. } | Self::Frontmatter { .. }
        )
    }

    /// True when the annotation engine is at fault.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

/// Result type alias using blogstat's Error type.
pub type Result<T> = std::result::Result<T, Error>;
