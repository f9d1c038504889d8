//! stack-filters CLI entry point
//!
//! Parses arguments, runs the selected command, and prints failures through
//! [`user_friendly_error`] before exiting with status 1.
//!
//! Commands:
//! - `render` - Render a template with the configuration filters
//! - `apply` - Apply one filter to a document
//! - `config` - Show the effective configuration
//! - `filters` - List the available filters

use anyhow::Result;
use clap::Parser;
use stack_filters::cli;
use stack_filters::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
