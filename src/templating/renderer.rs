//! Template rendering engine with Tera.
//!
//! This module provides the TemplateRenderer struct that wraps Tera with the
//! configuration filters registered and autoescaping disabled, since the
//! output is configuration text rather than HTML.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tera::{Context as TeraContext, Tera};

use crate::config::FilterConfig;
use crate::filters;

/// Template renderer with the configuration filters installed.
pub struct TemplateRenderer {
    tera: Tera,
    config: FilterConfig,
}

impl TemplateRenderer {
    /// Create a renderer whose filters use `config` for defaults and policies.
    pub fn new(config: FilterConfig) -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        filters::register_filters(&mut tera, &config);

        Self {
            tera,
            config,
        }
    }

    /// Configuration the filters were registered with.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Render a template string with `vars` as the top-level context.
    ///
    /// # Errors
    ///
    /// Fails when `vars` is not a mapping, when the template does not parse,
    /// or when a filter fails. Filter failures keep the [`crate::core::FilterError`]
    /// in the error's cause chain.
    pub fn render_str(&mut self, template: &str, vars: &Value) -> Result<String> {
        let context = Self::context_from(vars)?;
        tracing::debug!("Rendering inline template ({} bytes)", template.len());

        self.tera.render_str(template, &context).map_err(anyhow::Error::from)
    }

    /// Render the template stored at `path`.
    pub fn render_file(&mut self, path: &Path, vars: &Value) -> Result<String> {
        let template = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
        let context = Self::context_from(vars)?;
        let name = path.display().to_string();

        tracing::debug!("Rendering template {}", name);
        self.tera
            .add_raw_template(&name, &template)
            .with_context(|| format!("Failed to parse template: {name}"))?;

        self.tera
            .render(&name, &context)
            .with_context(|| format!("Failed to render template: {name}"))
    }

    fn context_from(vars: &Value) -> Result<TeraContext> {
        if !vars.is_object() {
            anyhow::bail!(
                "Template variables must be a mapping, found {}",
                crate::core::json_kind(vars)
            );
        }
        TeraContext::from_value(vars.clone()).context("Failed to build template context")
    }
}
