//! Configuration for the blogstat CLI.
//!
//! Provides the [`BlogstatConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `BLOGSTAT_CONFIG` environment variable
//! 3. XDG default: `~/.config/blogstat/config.toml`
//! 4. Built-in defaults
//!
//! `BLOGSTAT_*` variables (e.g. `BLOGSTAT_DISPLAY_FORMAT=json`) are layered
//! over whichever file was found.

use clap::ValueEnum;
use confyg::{Confygery, env};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use blogstat_core::traits::{ConfigProvider, DEFAULT_CONTENT_GLOB};
use blogstat_core::util::paths::resolve_against;
use blogstat_core::{Error, Result};
use blogstat_lexical::{DEFAULT_TOP_K, EngineOptions};

/// Environment variable prefix and config directory name.
pub const ENV_PREFIX: &str = "BLOGSTAT";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "BLOGSTAT_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the blogstat CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogstatConfig {
    /// Project name, shown in `version` output.
    pub project_name: String,

    /// Base path that relative paths are resolved against (default: cwd).
    pub base_path: Option<String>,

    /// Where posts live.
    pub content: ContentConfig,

    /// Annotation and ranking settings.
    pub analysis: AnalysisConfig,

    /// Report rendering.
    pub display: DisplayConfig,
}

/// Post discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the posts.
    pub path: String,

    /// Glob, relative to `path`, that selects posts.
    pub glob: String,
}

/// Annotation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Entries per frequency ranking.
    #[serde(deserialize_with = "lenient")]
    pub top_k: usize,

    /// Optional user lexicon file.
    pub lexicon: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,

    /// Include the cleaned post text in reports.
    #[serde(deserialize_with = "lenient")]
    pub show_text: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON document per report.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for BlogstatConfig {
    fn default() -> Self {
        Self {
            project_name: "blogstat".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            analysis: AnalysisConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: "blogposts".to_string(),
            glob: DEFAULT_CONTENT_GLOB.to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            lexicon: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_text: true,
        }
    }
}

// ============================================================================
// Lenient scalars
// ============================================================================

// Environment overlays arrive as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Native(T),
    Text(String),
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Native(value) => Ok(value),
        Lenient::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl BlogstatConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        env_opts.add_section("analysis");
        env_opts.add_section("display");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    fn resolve_config_path_with(explicit: Option<&str>, from_env: Option<String>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| from_env.map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("blogstat").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Effective value of a dotted key such as `analysis.top_k`.
    ///
    /// Strings are returned bare; other values in TOML syntax.
    pub fn lookup(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self).map_err(|e| Error::serialization(e.to_string()))?;
        let value = key
            .split('.')
            .try_fold(&root, |node, part| node.get(part))
            .ok_or_else(|| Error::not_found(format!("config key '{key}' is unknown or unset")))?;
        Ok(match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Engine settings, with the lexicon path resolved against the base path.
    pub fn engine_options(&self) -> Result<EngineOptions> {
        let lexicon = match &self.analysis.lexicon {
            Some(path) => Some(resolve_against(&self.base_path()?, path)),
            None => None,
        };
        Ok(EngineOptions { lexicon })
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for BlogstatConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(resolve_against(&PathBuf::new(), p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self) -> Result<PathBuf> {
        Ok(resolve_against(&self.base_path()?, &self.content.path))
    }

    fn content_glob(&self) -> &str {
        &self.content.glob
    }
}

// ============================================================================
// Tests
// ============================================================================
