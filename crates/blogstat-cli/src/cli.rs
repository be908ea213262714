//! CLI argument parsing and command definitions.
//!
//! Global flags (config path, verbosity) plus the post commands (`list`,
//! `analyze`, `normalize`, `browse`) and the read-only `config` views.

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "blogstat", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "BLOGSTAT_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List discovered posts with their titles.
    List,

    /// Show readability statistics and frequent words for posts.
    Analyze(AnalyzeArgs),

    /// Print the cleaned text of a post.
    Normalize {
        /// Post to clean: list number, path, or file stem.
        selection: String,

        /// Show the text after every pass.
        #[arg(long)]
        trace: bool,
    },

    /// Pick posts interactively, one report per selection.
    Browse,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Arguments for `analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Posts to analyze: list numbers, paths, or file stems.
    pub selections: Vec<String>,

    /// Analyze every discovered post.
    #[arg(long, conflicts_with = "selections")]
    pub all: bool,

    /// Number of terms per ranking (overrides `analysis.top_k`).
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Output format (overrides `display.format`).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Leave the post text out of the report.
    #[arg(long)]
    pub no_text: bool,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Read-only views of the effective configuration.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show which config file is read.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Print one effective value by dotted key.
    Get {
        /// Dotted key (e.g., "analysis.top_k").
        key: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
