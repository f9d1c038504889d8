//! Render a template file with variables documents.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::config::FilterConfig;
use crate::templating::{TemplateRenderer, load_vars};

/// Render a Tera template with the configuration filters registered.
///
/// # Examples
///
/// ```bash
/// stack-filters render stack.json.tera --vars base.yml --vars prod.yml -o stack.json
/// ```
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template file to render
    template: PathBuf,

    /// Variables file (JSON, YAML or TOML); repeat to merge, later files win
    #[arg(short = 'e', long = "vars", value_name = "FILE")]
    vars: Vec<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl RenderCommand {
    pub fn execute(self, config: FilterConfig) -> Result<()> {
        let rendered = self.render(config)?;

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
                std::fs::write(path, &rendered)
                    .with_context(|| format!("Failed to write output: {}", path.display()))?;
                tracing::info!("Wrote {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes()).context("Failed to write to stdout")?;
                stdout.flush().context("Failed to write to stdout")?;
            }
        }

        Ok(())
    }

    fn render(&self, config: FilterConfig) -> Result<String> {
        let vars = load_vars(&self.vars)?;
        let mut renderer = TemplateRenderer::new(config);
        renderer.render_file(&self.template, &vars)
    }
}
