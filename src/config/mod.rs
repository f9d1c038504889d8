//! Configuration management for stack-filters
//!
//! A single TOML file selects filter defaults and the policies the filters
//! apply in ambiguous situations. Every key is optional; a missing file means
//! built-in defaults.
//!
//! ```toml
//! [compact]
//! item_separator = ","
//! key_separator = ":"
//!
//! [dict_override]
//! selector = "Type"
//! on_missing_selector = "error"   # or "skip"
//!
//! [dotted_dict]
//! on_conflict = "error"           # or "overwrite"
//!
//! [stack_inputs]
//! strategy = "host-vars"          # or "flat"
//! prefix = "config_"
//! ```
//!
//! # Configuration Priority
//!
//! 1. Explicit path (`--config`)
//! 2. `STACK_FILTERS_CONFIG` environment variable
//! 3. `./stack-filters.toml` in the working directory
//! 4. `<user config dir>/stack-filters/config.toml`
//! 5. Default values
//!
//! # Modules
//!
//! - `parser` - Generic TOML parsing utilities with error context

mod parser;

pub use parser::parse_config;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_INPUT_PREFIX, DEFAULT_ITEM_SEPARATOR, DEFAULT_KEY_SEPARATOR,
    DEFAULT_SELECTOR, GLOBAL_CONFIG_DIR, PROJECT_CONFIG_FILE,
};

/// Effective configuration for all filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Defaults for `compact`
    pub compact: CompactConfig,
    /// Defaults and policy for `dict_override`
    pub dict_override: DictOverrideConfig,
    /// Collision policy for `dotted_dict`
    pub dotted_dict: DottedDictConfig,
    /// Lookup strategy for `stack_inputs`
    pub stack_inputs: StackInputsConfig,
}

/// `[compact]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompactConfig {
    /// Written between sequence items and between mapping entries
    pub item_separator: String,
    /// Written between a mapping key and its value
    pub key_separator: String,
    /// Escape every character outside printable ASCII as `\uXXXX`
    pub ensure_ascii: bool,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            item_separator: DEFAULT_ITEM_SEPARATOR.to_string(),
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            ensure_ascii: false,
        }
    }
}

/// `[dict_override]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictOverrideConfig {
    /// Selector used when the template does not pass one
    pub selector: String,
    /// What to do with source entries that lack the selector
    pub on_missing_selector: MissingSelector,
}

impl Default for DictOverrideConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            on_missing_selector: MissingSelector::default(),
        }
    }
}

/// Policy for `dict_override` source entries without the selector field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingSelector {
    /// Fail with a missing-field error
    #[default]
    Error,
    /// Leave the entry out of the result
    Skip,
}

/// `[dotted_dict]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DottedDictConfig {
    /// What to do when a dotted key descends through a non-mapping value
    pub on_conflict: ConflictPolicy,
}

/// Policy for dotted keys that collide with an existing non-mapping value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Fail with a path conflict error
    #[default]
    Error,
    /// Replace the value with a fresh mapping
    Overwrite,
}

/// `[stack_inputs]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackInputsConfig {
    /// Which variable store the filter reads from
    pub strategy: LookupStrategy,
    /// Prefix used by the host-vars strategy when the template does not pass one
    pub prefix: String,
}

impl Default for StackInputsConfig {
    fn default() -> Self {
        Self {
            strategy: LookupStrategy::default(),
            prefix: DEFAULT_INPUT_PREFIX.to_string(),
        }
    }
}

/// Variable store layout consulted by `stack_inputs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupStrategy {
    /// `hostvars.<environment>.<prefix><snake_case(key)>`, values kept as-is
    #[default]
    HostVars,
    /// `config.<key>`, values coerced to text
    Flat,
}

impl FilterConfig {
    /// Load configuration following the priority order described in the module docs.
    ///
    /// An explicit path must exist. Implicit locations are skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit)? {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                parse_config(&path)
            }
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve which configuration file applies, if any.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            let expanded = expand_path(path)?;
            if !expanded.is_file() {
                anyhow::bail!("Configuration file not found: {}", expanded.display());
            }
            return Ok(Some(expanded));
        }

        if let Some(from_env) = std::env::var(CONFIG_ENV_VAR).ok().filter(|v| !v.is_empty()) {
            let expanded = expand_path(Path::new(&from_env))?;
            if !expanded.is_file() {
                anyhow::bail!(
                    "Configuration file from {CONFIG_ENV_VAR} not found: {}",
                    expanded.display()
                );
            }
            return Ok(Some(expanded));
        }

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Ok(Some(project));
        }

        Ok(Self::global_path().filter(|path| path.is_file()))
    }

    /// Location of the user-wide configuration file.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join("config.toml"))
    }
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
