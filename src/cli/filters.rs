//! List the available filters.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::filters::FilterKind;

/// Print every registered filter with a short description.
#[derive(Args, Debug)]
pub struct FiltersCommand {}

impl FiltersCommand {
    pub fn execute(self) -> Result<()> {
        for kind in FilterKind::ALL {
            println!("{} {}", format!("{:<15}", kind.name()).bold(), kind.summary().dimmed());
        }
        Ok(())
    }
}
