//! `stack_inputs`: resolve stack inputs from a variable store with defaults.
//!
//! An input specification maps input names to descriptors carrying a
//! `Default`. Each input is resolved by asking an [`InputLookup`] for a value;
//! a truthy value wins, otherwise the descriptor's `Default` is used.
//!
//! Two lookups exist, and configuration picks which one the filter uses:
//!
//! - [`HostVarsLookup`]: `vars.hostvars[environment][prefix + snake_case(key)]`,
//!   values returned as-is; an absent `hostvars` or environment is an error
//! - [`FlatLookup`]: `config[key]`, values coerced to text
//!
//! ```text
//! inputs = {"VpcId": {"Default": "vpc-0"}, "InstanceType": {"Default": "t3.micro"}}
//!
//! {{ inputs | stack_inputs(environment="prod", vars=root) }}
//!   reads root.hostvars.prod.config_vpc_id and root.hostvars.prod.config_instance_type
//!
//! {{ inputs | stack_inputs(config=settings) }}     (strategy = "flat")
//!   reads settings.VpcId and settings.InstanceType
//! ```

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::args::{Args, optional_object, optional_str, required_str, value_as_object};
use super::is_truthy;
use crate::config::{FilterConfig, LookupStrategy};
use crate::constants::{DEFAULT_FIELD, HOSTVARS_KEY};
use crate::core::FilterError;

/// Source of resolved values for [`resolve_inputs`].
pub trait InputLookup {
    /// Name of the store variable consulted for `input`; reported when resolution fails.
    fn variable_name(&self, input: &str) -> String;

    /// Value stored under `variable`, if any.
    fn lookup(&self, variable: &str) -> Option<&Value>;

    /// Whether the store itself exists. Without a store no input resolves,
    /// not even one with a `Default`.
    fn has_store(&self) -> bool {
        true
    }

    /// Conversion applied to every resolved value, found or defaulted.
    fn finish(&self, value: Value) -> Value {
        value
    }
}

/// Environment-scoped host variables keyed by prefixed snake-case names.
#[derive(Debug, Clone)]
pub struct HostVarsLookup<'a> {
    environment: Option<&'a Map<String, Value>>,
    prefix: String,
}

impl<'a> HostVarsLookup<'a> {
    /// Scope the lookup to `vars.hostvars[environment]`.
    ///
    /// # Arguments
    ///
    /// * `vars` - Variables document holding a `hostvars` mapping of environments
    /// * `environment` - Environment whose host variables are consulted
    /// * `prefix` - Prepended to the snake-cased input name, usually `config_`
    ///
    /// # Returns
    ///
    /// A lookup that never fails to construct. When `vars` has no `hostvars`
    /// mapping, or `hostvars` has no mapping for `environment`, the lookup has no
    /// store and [`resolve_inputs`] rejects every input with
    /// [`FilterError::MissingInput`], `Default`s included. A misspelled
    /// environment therefore fails instead of silently deploying defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stack_filters::filters::stack_inputs::{HostVarsLookup, InputLookup};
    ///
    /// let vars = json!({"hostvars": {"prod": {"config_vpc_id": "vpc-9"}}});
    /// let vars = vars.as_object().unwrap();
    ///
    /// let prod = HostVarsLookup::new(vars, "prod", "config_");
    /// assert_eq!(prod.variable_name("VpcId"), "config_vpc_id");
    /// assert_eq!(prod.lookup("config_vpc_id"), Some(&json!("vpc-9")));
    ///
    /// assert!(!HostVarsLookup::new(vars, "prdo", "config_").has_store());
    /// ```
    pub fn new(vars: &'a Map<String, Value>, environment: &str, prefix: impl Into<String>) -> Self {
        let scoped = vars
            .get(HOSTVARS_KEY)
            .and_then(|hostvars| hostvars.get(environment))
            .and_then(Value::as_object);

        if scoped.is_none() {
            tracing::debug!("stack_inputs: no host variables for environment '{}'", environment);
        }

        Self {
            environment: scoped,
            prefix: prefix.into(),
        }
    }
}

impl InputLookup for HostVarsLookup<'_> {
    fn variable_name(&self, input: &str) -> String {
        format!("{}{}", self.prefix, snake_case(input))
    }

    fn lookup(&self, variable: &str) -> Option<&Value> {
        self.environment?.get(variable)
    }

    fn has_store(&self) -> bool {
        self.environment.is_some()
    }
}

/// Flat configuration keyed directly by input name; results are text.
#[derive(Debug, Clone)]
pub struct FlatLookup<'a> {
    config: &'a Map<String, Value>,
}

impl<'a> FlatLookup<'a> {
    pub fn new(config: &'a Map<String, Value>) -> Self {
        Self {
            config,
        }
    }
}

impl InputLookup for FlatLookup<'_> {
    fn variable_name(&self, input: &str) -> String {
        input.to_string()
    }

    fn lookup(&self, variable: &str) -> Option<&Value> {
        self.config.get(variable)
    }

    fn finish(&self, value: Value) -> Value {
        Value::String(to_text(&value))
    }
}

/// Resolve every input in `inputs` through `lookup`, in declaration order.
///
/// For each input the store value named by [`InputLookup::variable_name`] wins
/// when it is truthy; otherwise the descriptor's `Default` is used, even when
/// that default is itself falsy. Every resolved value passes through
/// [`InputLookup::finish`].
///
/// # Arguments
///
/// * `inputs` - Input specification mapping input names to descriptors
/// * `lookup` - Store strategy, [`HostVarsLookup`] or [`FlatLookup`]
///
/// # Returns
///
/// A mapping with the same keys as `inputs`, in the same order. An empty
/// specification yields an empty mapping without consulting the store.
///
/// # Errors
///
/// [`FilterError::MissingInput`] naming the looked-up variable and the input
/// key when:
/// - the lookup has no store at all (see [`InputLookup::has_store`])
/// - the store has no truthy value and the descriptor has no `Default`, or
///   is not a mapping
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stack_filters::filters::stack_inputs::{FlatLookup, resolve_inputs};
///
/// let inputs = json!({"Port": {"Default": 80}});
/// let config = json!({"Port": 8080});
///
/// let resolved = resolve_inputs(
///     inputs.as_object().unwrap(),
///     &FlatLookup::new(config.as_object().unwrap()),
/// )
/// .unwrap();
/// assert_eq!(serde_json::Value::Object(resolved), json!({"Port": "8080"}));
/// ```
pub fn resolve_inputs(
    inputs: &Map<String, Value>,
    lookup: &dyn InputLookup,
) -> Result<Map<String, Value>, FilterError> {
    let mut resolved = Map::new();

    for (key, descriptor) in inputs {
        let variable = lookup.variable_name(key);

        if !lookup.has_store() {
            return Err(FilterError::MissingInput {
                variable,
                input: key.clone(),
            });
        }

        let value = match lookup.lookup(&variable).filter(|found| is_truthy(found)) {
            Some(found) => {
                tracing::debug!("stack_inputs: '{}' resolved from '{}'", key, variable);
                found.clone()
            }
            None => {
                let default = descriptor
                    .as_object()
                    .and_then(|d| d.get(DEFAULT_FIELD))
                    .ok_or_else(|| FilterError::MissingInput {
                        variable: variable.clone(),
                        input: key.clone(),
                    })?;
                tracing::debug!("stack_inputs: '{}' uses its Default", key);
                default.clone()
            }
        };

        resolved.insert(key.clone(), lookup.finish(value));
    }

    Ok(resolved)
}

/// Convert a mixed-case identifier to snake case.
///
/// An underscore goes before every capitalised word that follows another
/// character, then between a lowercase letter or digit and the uppercase letter
/// after it. The result is lowercased.
///
/// # Examples
///
/// ```
/// use stack_filters::filters::stack_inputs::snake_case;
///
/// assert_eq!(snake_case("VpcId"), "vpc_id");
/// assert_eq!(snake_case("DBInstanceClass"), "db_instance_class");
/// assert_eq!(snake_case("getHTTPResponseCode"), "get_http_response_code");
/// ```
pub fn snake_case(text: &str) -> String {
    static CAPITALISED_WORD: OnceLock<Regex> = OnceLock::new();
    static LOWER_UPPER: OnceLock<Regex> = OnceLock::new();

    let capitalised_word =
        CAPITALISED_WORD.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static pattern"));
    let lower_upper =
        LOWER_UPPER.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static pattern"));

    let split_words = capitalised_word.replace_all(text, "${1}_${2}");
    lower_upper.replace_all(&split_words, "${1}_${2}").to_lowercase()
}

/// Text form of a resolved value for the flat strategy.
///
/// Strings are unchanged, `null` is empty, numbers and booleans use their JSON
/// spelling, sequences and mappings become compact JSON.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Tera entry point; arguments depend on the configured strategy.
///
/// - host-vars: `environment=` (required), `vars=` (without it nothing resolves), `prefix=`
/// - flat: `config=`
pub(crate) fn apply(value: &Value, args: &Args, config: &FilterConfig) -> Result<Value, FilterError> {
    let inputs = value_as_object(value)?;
    let empty = Map::new();

    let resolved = match config.stack_inputs.strategy {
        LookupStrategy::HostVars => {
            let environment = required_str(args, "environment")?;
            let vars = optional_object(args, "vars")?.unwrap_or(&empty);
            let prefix = optional_str(args, "prefix")?.unwrap_or(config.stack_inputs.prefix.as_str());
            resolve_inputs(inputs, &HostVarsLookup::new(vars, environment, prefix))?
        }
        LookupStrategy::Flat => {
            let flat = optional_object(args, "config")?.unwrap_or(&empty);
            resolve_inputs(inputs, &FlatLookup::new(flat))?
        }
    };

    Ok(Value::Object(resolved))
}
