//! Command-line interface for stack-filters.
//!
//! Each command lives in its own module with its own argument structure and
//! execution logic.
//!
//! # Available Commands
//!
//! - `render` - Render a Tera template file with variables documents
//! - `apply` - Apply a single filter to a JSON/YAML/TOML document
//! - `config` - Show the effective configuration and where it came from
//! - `filters` - List the available filters
//!
//! # Command Usage Patterns
//!
//! ```bash
//! # Render a parameters template for production
//! stack-filters render params.json.tera --vars group_vars/all.yml --vars group_vars/prod.yml
//!
//! # Expand dotted keys from a flat document
//! stack-filters apply dotted_dict --input flat.yaml --arg 'paths=["Network"]'
//!
//! # Resolve inputs with the flat strategy configured in stack-filters.toml
//! stack-filters apply stack_inputs --input inputs.json --arg-file config=settings.json
//! ```
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only report errors
//! - `--config` - Path to a configuration file

mod apply;
mod config;
mod filters;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::FilterConfig;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and embedders can drive commands
/// without going through argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the subscriber; `RUST_LOG` overrides it when set
    pub log_level: Option<String>,

    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "stack-filters",
    about = "Configuration transformation filters for infrastructure templates",
    version,
    long_about = "Render Tera templates with configuration filters (compact, dict_override, dotted_dict, stack_inputs), or apply a single filter to a document."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to a configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template file
    Render(render::RenderCommand),

    /// Apply a single filter to a document
    Apply(apply::ApplyCommand),

    /// Show the effective configuration
    Config(config::ConfigCommand),

    /// List the available filters
    Filters(filters::FiltersCommand),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let path = config.config_path.as_deref();

        match self.command {
            Commands::Render(cmd) => cmd.execute(FilterConfig::load(path)?),
            Commands::Apply(cmd) => cmd.execute(FilterConfig::load(path)?),
            Commands::Config(cmd) => cmd.execute(path),
            Commands::Filters(cmd) => cmd.execute(),
        }
    }
}
