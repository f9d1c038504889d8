//! Global constants used throughout the stack-filters codebase.
//!
//! Default selector and prefix values, filter names, and the names of the
//! environment variables and files the configuration loader consults.

/// Default field used by `dict_override` to match source entries against override keys.
pub const DEFAULT_SELECTOR: &str = "Type";

/// Default prefix prepended to snake-cased input names by the host-vars lookup.
pub const DEFAULT_INPUT_PREFIX: &str = "config_";

/// Field of an input descriptor holding its fallback value.
pub const DEFAULT_FIELD: &str = "Default";

/// Top-level key of the variable store that holds per-environment host variables.
pub const HOSTVARS_KEY: &str = "hostvars";

/// Default item separator for `compact`.
pub const DEFAULT_ITEM_SEPARATOR: &str = ",";

/// Default key separator for `compact`.
pub const DEFAULT_KEY_SEPARATOR: &str = ":";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "STACK_FILTERS_CONFIG";

/// Project-local configuration file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "stack-filters.toml";

/// Directory under the user config dir holding the global `config.toml`.
pub const GLOBAL_CONFIG_DIR: &str = "stack-filters";

/// Maximum Levenshtein distance, as a percentage of the target length, for name suggestions.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
