//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async post discovery and reading utilities
//! - [`paths`]: Path resolution helpers (tilde expansion, base-relative paths)

pub mod files;
pub mod paths;
