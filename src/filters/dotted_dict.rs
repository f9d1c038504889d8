//! `dotted_dict`: expand dotted keys into nested mappings.
//!
//! ```text
//! vars = {"Network.Vpc.Cidr": "10.0.0.0/16", "Network.Vpc.Name": "main", "Other": 1}
//!
//! {{ vars | dotted_dict(paths=["Network"]) }}
//!   -> {"Network": {"Vpc": {"Cidr": "10.0.0.0/16", "Name": "main"}}}
//! ```
//!
//! Keys are written shortest first so a parent is always in place before its
//! children descend into it. Ties on length are broken lexicographically.

use serde_json::{Map, Value};

use super::args::{Args, optional_str_list, value_as_object};
use crate::config::{ConflictPolicy, FilterConfig};
use crate::core::FilterError;

/// Build a nested mapping from every key in `vars` starting with one of `paths`.
///
/// Prefix matching is plain string matching: `"Net"` selects `"Network.Vpc"`.
/// When a key descends through an existing mapping, it writes into that
/// mapping. When it meets an existing non-mapping value, `on_conflict` decides.
///
/// # Errors
///
/// [`FilterError::PathConflict`] under [`ConflictPolicy::Error`] when a dotted
/// key would have to descend through a scalar or sequence.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stack_filters::config::ConflictPolicy;
/// use stack_filters::filters::dotted_dict;
///
/// let vars = json!({"a.b": 1, "a.c": 2});
/// let result = dotted_dict(vars.as_object().unwrap(), &["a".to_string()], ConflictPolicy::Error).unwrap();
/// assert_eq!(serde_json::Value::Object(result), json!({"a": {"b": 1, "c": 2}}));
/// ```
pub fn dotted_dict(
    vars: &Map<String, Value>,
    paths: &[String],
    on_conflict: ConflictPolicy,
) -> Result<Map<String, Value>, FilterError> {
    let mut selected: Vec<(&String, &Value)> = vars
        .iter()
        .filter(|(key, _)| paths.iter().any(|prefix| key.starts_with(prefix.as_str())))
        .collect();
    selected.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    tracing::debug!("dotted_dict: {} of {} keys selected", selected.len(), vars.len());

    let mut root = Map::new();
    for (key, value) in selected {
        insert_path(&mut root, key, value.clone(), on_conflict)?;
    }
    Ok(root)
}

fn insert_path(
    root: &mut Map<String, Value>,
    key: &str,
    value: Value,
    on_conflict: ConflictPolicy,
) -> Result<(), FilterError> {
    let segments: Vec<&str> = key.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current.entry(*segment).or_insert_with(|| Value::Object(Map::new()));

        if !slot.is_object() {
            let existing = parents[..=depth].join(".");
            match on_conflict {
                ConflictPolicy::Error => {
                    return Err(FilterError::PathConflict {
                        key: key.to_string(),
                        existing,
                    });
                }
                ConflictPolicy::Overwrite => {
                    tracing::warn!(
                        "dotted_dict: '{}' replaces non-mapping value at '{}'",
                        key,
                        existing
                    );
                    *slot = Value::Object(Map::new());
                }
            }
        }

        current = match slot {
            Value::Object(map) => map,
            _ => {
                return Err(FilterError::PathConflict {
                    key: key.to_string(),
                    existing: parents[..=depth].join("."),
                });
            }
        };
    }

    current.insert((*leaf).to_string(), value);
    Ok(())
}

/// Tera entry point: `paths=` (list of prefixes, or one prefix string).
pub(crate) fn apply(value: &Value, args: &Args, config: &FilterConfig) -> Result<Value, FilterError> {
    let vars = value_as_object(value)?;
    let paths = optional_str_list(args, "paths")?.unwrap_or_default();

    dotted_dict(vars, &paths, config.dotted_dict.on_conflict).map(Value::Object)
}
