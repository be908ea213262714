//! Markdown source handling.
//!
//! - [`frontmatter`]: YAML frontmatter extraction

pub mod frontmatter;

pub use frontmatter::{FrontmatterResult, extract_frontmatter, strip_frontmatter};
