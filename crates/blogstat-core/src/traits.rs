//! Core traits for blogstat.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where posts live
//! and how they are discovered, so the pipeline and its tests do not depend on
//! a concrete configuration loader.

use std::path::PathBuf;

use crate::Result;

/// Default glob used to discover posts beneath the content root.
pub const DEFAULT_CONTENT_GLOB: &str = "**/*.md";

/// Trait for configuration consumed by the pipeline.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use blogstat_core::traits::ConfigProvider;
/// use blogstat_core::Result;
///
/// #[derive(Clone)]
/// struct BlogConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for BlogConfig {
///     fn project_name(&self) -> &str {
///         "my-blog"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self) -> Result<PathBuf> {
///         Ok(self.root.join("blogposts"))
///     }
/// }
///
/// let config = BlogConfig { root: PathBuf::from("/srv/blog") };
/// assert_eq!(config.content_glob(), "**/*.md");
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for display and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Root directory that holds the markdown posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn content_path(&self) -> Result<PathBuf>;

    /// Glob, relative to [`content_path`](Self::content_path), that selects posts.
    fn content_glob(&self) -> &str {
        DEFAULT_CONTENT_GLOB
    }
}
