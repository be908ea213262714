//! blogstat core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all blogstat crates.
//! It has no internal blogstat dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: The [`ConfigProvider`] trait
//! - [`util`]: File discovery and path utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::files::{FileInfo, FindOptions, find_all_files, read_file};
