//! The blogstat application.
//!
//! [`BlogstatCli`] owns the loaded configuration, sets up logging, and
//! dispatches each command. Commands that analyze posts initialize the
//! annotation [`Engine`] first; if that fails nothing is served.

use std::io::Write;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use blogstat_content::{load_document, normalize, normalize_with_trace};
use blogstat_core::Result;
use blogstat_lexical::Engine;

use crate::browse::browse;
use crate::catalog::Catalog;
use crate::cli::{AnalyzeArgs, CliArgs, Command, ConfigAction};
use crate::config::{BlogstatConfig, OutputFormat};
use crate::display::{ReportOptions, render_error, render_listing, render_report, render_trace};
use crate::pipeline::analyze_selection;
use crate::state::AppState;

// ============================================================================
// BlogstatCli
// ============================================================================

/// The CLI application.
pub struct BlogstatCli {
    name: String,
    config: Arc<BlogstatConfig>,
    version: String,
}

impl BlogstatCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = BlogstatConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: BlogstatConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &BlogstatConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Library crates log through `log`; those records are forwarded too.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Build the annotation engine and the shared state.
    pub fn init_state(&self) -> Result<AppState<BlogstatConfig>> {
        let options = self.config.engine_options()?;
        let engine = Engine::initialize(&options).inspect_err(|e| {
            tracing::error!("annotation engine failed to start: {e}");
        })?;
        Ok(AppState::from_arc(Arc::clone(&self.config), engine))
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let mut stdout = std::io::stdout();

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::List) => self.cmd_list(&mut stdout).await,
            Some(Command::Analyze(analyze)) => {
                let state = self.init_state()?;
                self.cmd_analyze(&state, analyze, &mut stdout).await
            }
            Some(Command::Normalize { selection, trace }) => {
                self.cmd_normalize(&selection, trace, &mut stdout).await
            }
            Some(Command::Browse) => {
                let state = self.init_state()?;
                let catalog = Catalog::discover(state.config()).await?;
                let options = ReportOptions::from_config(&self.config);
                let input = BufReader::new(tokio::io::stdin());
                browse(&state, &catalog, &options, input, &mut stdout).await?;
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                self.cmd_config(args.config.as_deref(), config_cmd.command, &mut stdout)
            }
            None => {
                println!("{} {} - use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Command handlers
    // ------------------------------------------------------------------------

    async fn cmd_list<W: Write>(&self, out: &mut W) -> Result<()> {
        let catalog = Catalog::discover(self.config.as_ref()).await?;
        write!(out, "{}", render_listing(&catalog.listing().await))?;
        Ok(())
    }

    /// Analyze each selection in turn. Failures are reported in place and
    /// do not stop later selections.
    async fn cmd_analyze<W: Write>(
        &self,
        state: &AppState<BlogstatConfig>,
        args: AnalyzeArgs,
        out: &mut W,
    ) -> Result<()> {
        let catalog = Catalog::discover(state.config()).await?;

        let mut options = ReportOptions::from_config(&self.config);
        if let Some(top) = args.top {
            options.top_k = top;
        }
        if let Some(format) = args.format {
            options.format = format;
        }
        if args.no_text {
            options.show_text = false;
        }

        let selections = if args.all || args.selections.is_empty() {
            catalog.all_selections()
        } else {
            args.selections
        };

        let mut failed = 0;
        for (i, selection) in selections.iter().enumerate() {
            if i > 0 && options.format == OutputFormat::Text {
                writeln!(out)?;
            }
            match analyze_selection(state, &catalog, selection, options.top_k).await {
                Ok(report) => write!(out, "{}", render_report(&report, &options)?)?,
                Err(e) => {
                    failed += 1;
                    log::warn!("selection '{selection}' failed: {e}");
                    write!(out, "{}", render_error(selection, &e, options.format))?;
                }
            }
        }

        log::info!(
            "analyzed {} of {} selection(s)",
            selections.len() - failed,
            selections.len()
        );
        Ok(())
    }

    async fn cmd_normalize<W: Write>(&self, selection: &str, trace: bool, out: &mut W) -> Result<()> {
        let catalog = Catalog::discover(self.config.as_ref()).await?;
        let path = catalog.resolve(selection)?;
        let doc = load_document(&path).await?;
        if trace {
            write!(out, "{}", render_trace(&normalize_with_trace(&doc.raw_body)))?;
        } else {
            writeln!(out, "{}", normalize(&doc.raw_body))?;
        }
        Ok(())
    }

    fn cmd_config<W: Write>(
        &self,
        config_path: Option<&str>,
        action: ConfigAction,
        out: &mut W,
    ) -> Result<()> {
        match action {
            ConfigAction::Path => match BlogstatConfig::resolve_config_path(config_path) {
                Some(path) if path.exists() => writeln!(out, "{}", path.display())?,
                Some(path) => writeln!(out, "{} (not found; using defaults)", path.display())?,
                None => writeln!(out, "(no config directory; using defaults)")?,
            },
            ConfigAction::Show => write!(out, "{}", self.config.to_toml_string()?)?,
            ConfigAction::Get { key } => writeln!(out, "{}", self.config.lookup(&key)?)?,
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
