//! Variables documents for template rendering.
//!
//! Variables come from JSON, YAML, or TOML files. Several files are
//! deep-merged in the order given, so later files override earlier ones.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::path::Path;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Guess the format from a file extension. Unknown extensions read as YAML,
    /// which also accepts JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Parse `content` as a JSON value.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(content).context("Invalid JSON document")?,
        DocumentFormat::Yaml => {
            if content.trim().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_yaml::from_str(content).context("Invalid YAML document")?
            }
        }
        DocumentFormat::Toml => toml::from_str(content).context("Invalid TOML document")?,
    };
    Ok(value)
}

/// Read and parse one variables file.
pub fn load_vars_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read variables file: {}", path.display()))?;

    parse_document(&content, DocumentFormat::from_path(path))
        .with_context(|| format!("Failed to parse variables file: {}", path.display()))
}

/// Load and deep-merge several variables files into one mapping.
///
/// Files are merged in the order given with [`deep_merge_json`]: nested
/// mappings merge key by key, while sequences and scalars from a later file
/// replace earlier ones.
///
/// # Arguments
///
/// * `paths` - Variables files; the format of each follows its extension
///   (see [`DocumentFormat::from_path`])
///
/// # Returns
///
/// The merged mapping. No files yields an empty mapping.
///
/// # Errors
///
/// Fails when a file cannot be read or parsed, or when a file does not hold a
/// mapping at the top level. The error names the offending file.
///
/// # Examples
///
/// ```rust,no_run
/// use stack_filters::templating::load_vars;
///
/// # fn example() -> anyhow::Result<()> {
/// let vars = load_vars(&["group_vars/all.yml", "group_vars/prod.yml"])?;
/// assert!(vars.is_object());
/// # Ok(())
/// # }
/// ```
pub fn load_vars<P: AsRef<Path>>(paths: &[P]) -> Result<Value> {
    let mut merged = Value::Object(Map::new());

    for path in paths {
        let path = path.as_ref();
        let document = load_vars_file(path)?;
        if !document.is_object() {
            bail!(
                "Variables file {} must contain a mapping at the top level, found {}",
                path.display(),
                crate::core::json_kind(&document)
            );
        }
        tracing::debug!("Merging variables from {}", path.display());
        merged = deep_merge_json(merged, &document);
    }

    Ok(merged)
}

/// Perform a deep merge of two JSON values.
///
/// Recursively merges `overrides` into `base`. For objects, fields from `overrides`
/// are added or replace fields in `base`. For arrays and primitives, `overrides`
/// completely replaces `base`.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use stack_filters::templating::deep_merge_json;
///
/// let base = json!({ "hostvars": { "prod": { "config_port": 80, "config_name": "web" } } });
/// let overrides = json!({ "hostvars": { "prod": { "config_port": 443 } } });
///
/// let result = deep_merge_json(base, &overrides);
/// assert_eq!(result, json!({ "hostvars": { "prod": { "config_port": 443, "config_name": "web" } } }));
/// ```
pub fn deep_merge_json(mut base: Value, overrides: &Value) -> Value {
    match (base.as_object_mut(), overrides.as_object()) {
        (Some(base_obj), Some(override_obj)) => {
            for (key, override_value) in override_obj {
                match base_obj.get_mut(key) {
                    Some(base_value) if base_value.is_object() && override_value.is_object() => {
                        let merged = deep_merge_json(base_value.take(), override_value);
                        *base_value = merged;
                    }
                    _ => {
                        base_obj.insert(key.clone(), override_value.clone());
                    }
                }
            }
            base
        }
        _ => overrides.clone(),
    }
}
