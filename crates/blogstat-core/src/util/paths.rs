//! Path resolution utilities.

use std::path::{Path, PathBuf};

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use blogstat_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/documents");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Resolves `path` against `base` after tilde expansion.
///
/// Absolute paths (and `~` paths) are returned as-is; relative paths are
/// joined onto `base`.
pub fn resolve_against<P: AsRef<Path>>(base: &Path, path: P) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
