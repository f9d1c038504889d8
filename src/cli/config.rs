//! Show the effective configuration.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::Path;

use crate::config::FilterConfig;

/// Output format for `config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Print the configuration the filters would run with.
///
/// # Examples
///
/// ```bash
/// stack-filters config
/// stack-filters config --format json
/// stack-filters config --path
/// ```
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    format: ConfigFormat,

    /// Only print which configuration file is in effect
    #[arg(long)]
    path: bool,
}

impl ConfigCommand {
    pub fn execute(self, explicit: Option<&Path>) -> Result<()> {
        if self.path {
            match FilterConfig::locate(explicit)? {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", "No configuration file found, using defaults".yellow()),
            }
            return Ok(());
        }

        let config = FilterConfig::load(explicit)?;
        println!("{}", self.render(&config)?);
        Ok(())
    }

    fn render(&self, config: &FilterConfig) -> Result<String> {
        match self.format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).context("Failed to serialize configuration")
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(config).context("Failed to serialize configuration")
            }
        }
    }
}
