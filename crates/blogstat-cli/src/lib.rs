//! Command-line dashboard for markdown blog posts.
//!
//! # Modules
//!
//! - [`cli`]: argument parsing
//! - [`config`]: TOML + environment configuration
//! - [`catalog`]: post discovery and selection
//! - [`pipeline`]: load, normalize, annotate, aggregate
//! - [`display`]: report, listing and trace rendering
//! - [`browse`]: the interactive loop
//! - [`state`]: shared config and engine
//! - [`app`]: [`BlogstatCli`], which wires the above together

#![doc = include_str!("../README.md")]

pub mod app;
pub mod browse;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod pipeline;
pub mod state;

pub use app::BlogstatCli;
pub use catalog::{Catalog, ListingEntry};
pub use cli::{AnalyzeArgs, CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::{BlogstatConfig, OutputFormat};
pub use display::ReportOptions;
pub use pipeline::{PostReport, analyze_document, analyze_post, analyze_selection};
pub use state::AppState;
