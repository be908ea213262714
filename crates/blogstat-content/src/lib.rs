//! Frontmatter extraction, post loading, and prose normalization.
//!
//! This crate turns a markdown post on disk into the clean prose that the
//! annotation engine consumes.
//!
//! # Modules
//!
//! - [`markdown`]: YAML frontmatter extraction
//! - [`document`]: [`Document`] loading
//! - [`normalize`]: the ordered markup-stripping passes
//!
//! # Example
//!
//! ```rust
//! use blogstat_content::{Document, normalize};
//!
//! let doc = Document::parse("post.md", "---\ntitle: Hi\n---\nSee [this](http://x.io)!").unwrap();
//! assert_eq!(doc.title, "Hi");
//! assert_eq!(normalize(&doc.raw_body), "See this");
//! ```

#![doc = include_str!("../README.md")]

pub mod document;
pub mod markdown;
pub mod normalize;

pub use document::{Document, load_document};
pub use markdown::{FrontmatterResult, extract_frontmatter, strip_frontmatter};
pub use normalize::{NORMALIZE_PASSES, Pass, PassTrace, normalize, normalize_with_trace};
