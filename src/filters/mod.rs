//! Configuration transformation filters.
//!
//! Four independent, pure filters over JSON values:
//!
//! - [`compact`] - minified JSON with configurable separators
//! - [`dict_override`] - re-key overrides by a selector field
//! - [`dotted_dict`] - expand dotted keys into nested mappings
//! - [`stack_inputs`] - resolve stack inputs from a variable store with defaults
//!
//! Each is usable directly from Rust and as a Tera filter. [`register_filters`]
//! installs all of them into a [`tera::Tera`] instance under their short
//! names, closing over a [`FilterConfig`] that supplies defaults and policies.
//!
//! # Examples
//!
//! ```rust
//! use stack_filters::config::FilterConfig;
//! use stack_filters::filters::register_filters;
//!
//! let mut tera = tera::Tera::default();
//! register_filters(&mut tera, &FilterConfig::default());
//!
//! let mut context = tera::Context::new();
//! context.insert("vars", &serde_json::json!({"a.b": 1, "a.c": 2}));
//!
//! let rendered = tera
//!     .render_str(r#"{{ vars | dotted_dict(paths=["a"]) | compact }}"#, &context)
//!     .unwrap();
//! assert_eq!(rendered, r#"{"a":{"b":1,"c":2}}"#);
//! ```

mod args;
pub mod compact;
pub mod dict_override;
pub mod dotted_dict;
pub mod stack_inputs;

pub use compact::{Separators, compact};
pub use dict_override::dict_override;
pub use dotted_dict::dotted_dict;
pub use stack_inputs::{FlatLookup, HostVarsLookup, InputLookup, resolve_inputs, snake_case};

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use strsim::levenshtein;

use crate::config::FilterConfig;
use crate::constants::SIMILARITY_THRESHOLD_PERCENT;
use crate::core::FilterError;

/// The registered filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Compact,
    DictOverride,
    DottedDict,
    StackInputs,
}

impl FilterKind {
    /// Every filter, in registration order.
    pub const ALL: [Self; 4] = [Self::Compact, Self::DictOverride, Self::DottedDict, Self::StackInputs];

    /// Name the filter is registered under.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::DictOverride => "dict_override",
            Self::DottedDict => "dotted_dict",
            Self::StackInputs => "stack_inputs",
        }
    }

    /// One-line description for `--help` style listings.
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Compact => "serialize a value to minified JSON",
            Self::DictOverride => "re-key overrides by matching a selector field",
            Self::DottedDict => "expand dotted keys into nested mappings",
            Self::StackInputs => "resolve stack inputs from a variable store with defaults",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        // Accept the dashed spelling that is natural on a command line.
        let normalized = name.trim().replace('-', "_");
        Self::ALL.into_iter().find(|kind| kind.name() == normalized).ok_or_else(|| {
            FilterError::UnknownFilter {
                name: name.to_string(),
                suggestions: find_similar_names(&normalized),
            }
        })
    }
}

/// Closest registered filter names by Levenshtein distance.
fn find_similar_names(target: &str) -> Vec<String> {
    let mut scored: Vec<_> =
        FilterKind::ALL.iter().map(|kind| (kind.name(), levenshtein(target, kind.name()))).collect();

    scored.sort_by_key(|(_, dist)| *dist);

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Python-style truthiness: `null`, `false`, zero, and empty strings,
/// sequences, and mappings are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Apply one filter to `value` with Tera-style keyword arguments.
///
/// This is the single dispatch point used by both the Tera adapters and the
/// `apply` command.
///
/// # Arguments
///
/// * `kind` - Filter to run
/// * `value` - Piped value; every filter except `compact` requires a mapping
/// * `args` - Keyword arguments as a template would pass them
/// * `config` - Defaults and policies for arguments the caller leaves out
///
/// # Returns
///
/// A string for `compact`, a mapping for the other filters.
///
/// # Errors
///
/// Returns [`FilterError::InvalidValue`] or [`FilterError::InvalidArgument`]
/// for wrongly shaped input, and the filter's own error otherwise.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use std::collections::HashMap;
/// use stack_filters::config::FilterConfig;
/// use stack_filters::filters::{FilterKind, apply_filter};
///
/// let mut args = HashMap::new();
/// args.insert("paths".to_string(), json!(["Db"]));
///
/// let nested = apply_filter(
///     FilterKind::DottedDict,
///     &json!({"Db.Port": 5432}),
///     &args,
///     &FilterConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(nested, json!({"Db": {"Port": 5432}}));
/// ```
pub fn apply_filter(
    kind: FilterKind,
    value: &Value,
    args: &HashMap<String, Value>,
    config: &FilterConfig,
) -> Result<Value, FilterError> {
    match kind {
        FilterKind::Compact => compact::apply(value, args, config),
        FilterKind::DictOverride => dict_override::apply(value, args, config),
        FilterKind::DottedDict => dotted_dict::apply(value, args, config),
        FilterKind::StackInputs => stack_inputs::apply(value, args, config),
    }
}

/// Creates a Tera filter for `kind` bound to `config`.
///
/// Failures surface as template rendering errors whose source is the
/// underlying [`FilterError`].
pub fn create_filter(kind: FilterKind, config: FilterConfig) -> impl tera::Filter + 'static {
    move |value: &tera::Value, args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        apply_filter(kind, value, args, &config)
            .map_err(|e| tera::Error::chain(format!("{kind} filter error"), e))
    }
}

/// Register every filter into `tera`.
pub fn register_filters(tera: &mut tera::Tera, config: &FilterConfig) {
    for kind in FilterKind::ALL {
        tracing::trace!("Registering filter '{}'", kind);
        tera.register_filter(kind.name(), create_filter(kind, config.clone()));
    }
}
