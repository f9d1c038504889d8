//! `dict_override`: re-key overrides by matching a selector field.
//!
//! Given resources keyed by logical name, each carrying a `Type`, and
//! overrides keyed by type, produce overrides keyed by logical name:
//!
//! ```text
//! source    = {"Web": {"Type": "AWS::EC2::Instance"}, "Db": {"Type": "AWS::RDS::DBInstance"}}
//! overrides = {"AWS::EC2::Instance": {"DeletionPolicy": "Retain"}}
//!
//! {{ source | dict_override(overrides=overrides) }}
//!   -> {"Web": {"DeletionPolicy": "Retain"}}
//! ```

use serde_json::{Map, Value};

use super::args::{Args, optional_str, required_object, value_as_object};
use crate::config::{FilterConfig, MissingSelector};
use crate::core::FilterError;

/// Map each source key to the override whose key equals the entry's selector value.
///
/// The override value is copied wholesale, never merged. Source entries with
/// no matching override are left out. The result follows source order.
///
/// Only string selector values can match, since override keys are strings.
///
/// # Errors
///
/// With [`MissingSelector::Error`], a source entry that is not a mapping or
/// lacks `selector` fails with [`FilterError::MissingField`]. With
/// [`MissingSelector::Skip`] such entries are ignored.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stack_filters::config::MissingSelector;
/// use stack_filters::filters::dict_override;
///
/// let source = json!({"k1": {"Type": "T1"}, "k2": {"Type": "T2"}});
/// let overrides = json!({"T1": "override-value"});
///
/// let result = dict_override(
///     source.as_object().unwrap(),
///     overrides.as_object().unwrap(),
///     "Type",
///     MissingSelector::Error,
/// )
/// .unwrap();
/// assert_eq!(serde_json::Value::Object(result), json!({"k1": "override-value"}));
/// ```
pub fn dict_override(
    source: &Map<String, Value>,
    overrides: &Map<String, Value>,
    selector: &str,
    on_missing: MissingSelector,
) -> Result<Map<String, Value>, FilterError> {
    let mut result = Map::new();

    for (source_key, source_value) in source {
        let Some(selected) = source_value.as_object().and_then(|entry| entry.get(selector)) else {
            match on_missing {
                MissingSelector::Error => {
                    return Err(FilterError::MissingField {
                        field: selector.to_string(),
                        entry: source_key.clone(),
                    });
                }
                MissingSelector::Skip => {
                    tracing::debug!(
                        "dict_override: skipping '{}' without '{}' field",
                        source_key,
                        selector
                    );
                    continue;
                }
            }
        };

        let matched = selected.as_str().and_then(|type_key| overrides.get(type_key));
        if let Some(override_value) = matched {
            tracing::trace!("dict_override: '{}' matched {}", source_key, selected);
            result.insert(source_key.clone(), override_value.clone());
        }
    }

    Ok(result)
}

/// Tera entry point: `overrides=` (required), `selector=` (optional).
pub(crate) fn apply(value: &Value, args: &Args, config: &FilterConfig) -> Result<Value, FilterError> {
    let source = value_as_object(value)?;
    let overrides = required_object(args, "overrides")?;
    let selector = optional_str(args, "selector")?.unwrap_or(config.dict_override.selector.as_str());

    dict_override(source, overrides, selector, config.dict_override.on_missing_selector)
        .map(Value::Object)
}
