//! Generic configuration parsing utilities.
//!
//! Reads a TOML file into any `DeserializeOwned` type, reporting the file path
//! when reading or parsing fails.
//!
//! Example error output:
//! ```text
//! Failed to parse config file: /path/to/stack-filters.toml
//! Caused by:
//!     unknown variant `registry`, expected `host-vars` or `flat`
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use stack_filters::config::{FilterConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: FilterConfig = parse_config(Path::new("stack-filters.toml"))?;
/// println!("selector: {}", config.dict_override.selector);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid TOML, or does not match `T`.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterConfig, LookupStrategy};

    #[test]
    fn test_parse_config() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("stack-filters.toml");

        let toml_content = r#"
            [stack_inputs]
            strategy = "flat"
            prefix = "param_"
        "#;

        std::fs::write(&config_path, toml_content).unwrap();

        let config: FilterConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.stack_inputs.strategy, LookupStrategy::Flat);
        assert_eq!(config.stack_inputs.prefix, "param_");
    }

    #[test]
    fn test_parse_config_error() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("invalid.toml");

        let invalid_toml = "invalid = toml {";
        std::fs::write(&config_path, invalid_toml).unwrap();

        let result: Result<FilterConfig> = parse_config(&config_path);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_config_missing_file() {
        let result: Result<FilterConfig> = parse_config(Path::new("/nonexistent/filters.toml"));
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
