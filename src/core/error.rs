//! Error handling for stack-filters
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`FilterError`]) for every failure a filter can raise
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and suggestions for CLI users
//!
//! Filters return [`FilterError`] directly. Application code (file loading, the
//! renderer, the CLI) works in [`anyhow::Result`] and attaches context with
//! `.with_context()`. At the top of the binary, [`user_friendly_error`] turns
//! whatever bubbled up into an [`ErrorContext`] and prints it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use stack_filters::core::{FilterError, user_friendly_error};
//!
//! let error = FilterError::MissingInput {
//!     variable: "config_vpc_id".to_string(),
//!     input: "VpcId".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Errors raised by the configuration filters.
///
/// Every variant names the piece of caller data that caused it, so the
/// template host can surface it without extra context.
#[derive(Error, Debug, Clone)]
pub enum FilterError {
    /// A required field is absent from a mapping entry.
    ///
    /// Raised by `dict_override` when a source entry has no selector field.
    #[error("Missing field '{field}' in entry '{entry}'")]
    MissingField {
        /// Name of the absent field
        field: String,
        /// Key of the entry that lacks it
        entry: String,
    },

    /// An input could neither be resolved from the variable store nor from its `Default`.
    #[error(
        "Missing {variable} variable for {input} input. Please define this variable or specify a 'Default' property for the input."
    )]
    MissingInput {
        /// Variable that was looked up in the store
        variable: String,
        /// Input key from the input specification
        input: String,
    },

    /// Two dotted keys imply incompatible structure.
    #[error("Dotted key '{key}' cannot descend into '{existing}', which already holds a non-mapping value")]
    PathConflict {
        /// Key being written
        key: String,
        /// Prefix of `key` that already holds a scalar or sequence
        existing: String,
    },

    /// A filter argument is missing or has the wrong type.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name as used in the template
        name: String,
        /// What was expected
        reason: String,
    },

    /// The piped value has the wrong shape for the filter.
    #[error("Invalid value: expected {expected}, got {found}")]
    InvalidValue {
        /// Expected JSON kind
        expected: String,
        /// Actual JSON kind
        found: String,
    },

    /// The encoder rejected the value.
    #[error("Serialization failed: {message}")]
    Serialization {
        /// Message from serde_json
        message: String,
    },

    /// A filter name that is not registered.
    #[error("Unknown filter '{name}'")]
    UnknownFilter {
        /// Name that was requested
        name: String,
        /// Closest registered names
        suggestions: Vec<String>,
    },
}

impl From<serde_json::Error> for FilterError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl FilterError {
    /// Build an [`FilterError::InvalidValue`] describing `found`'s JSON kind.
    pub fn invalid_value(expected: &str, found: &serde_json::Value) -> Self {
        Self::InvalidValue {
            expected: expected.to_string(),
            found: json_kind(found).to_string(),
        }
    }
}

/// Short name of a JSON value's kind, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

/// Error wrapper carrying a user-facing suggestion and details.
///
/// # Examples
///
/// ```rust,no_run
/// use stack_filters::core::{ErrorContext, FilterError};
///
/// let context = ErrorContext::new(FilterError::PathConflict {
///     key: "a.b".to_string(),
///     existing: "a".to_string(),
/// })
/// .with_suggestion("Remove one of the conflicting keys")
/// .with_details("'a' is a scalar, so 'a.b' has nowhere to go");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`FilterError`]
    #[must_use]
    pub fn new(error: FilterError) -> Self {
        Self::from_message(error.to_string())
    }

    /// Create a context from a plain message
    #[must_use]
    pub const fn from_message(message: String) -> Self {
        Self {
            message,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises [`FilterError`] (anywhere in the cause chain), [`tera::Error`],
/// [`std::io::Error`] and TOML parse errors. Anything else is shown with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain = error.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ");

    for cause in error.chain() {
        if let Some(filter_error) = cause.downcast_ref::<FilterError>() {
            return create_error_context(filter_error, &chain);
        }
    }

    if let Some(tera_error) = error.downcast_ref::<tera::Error>() {
        return ErrorContext::from_message(chain)
            .with_details(format!("Template engine reported: {}", tera_error_kind(tera_error)))
            .with_suggestion(
                "Check the template syntax and that every variable and filter argument is defined",
            );
    }

    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            let suggestion = match io_error.kind() {
                std::io::ErrorKind::NotFound => {
                    "Check that the file exists and the path is correct"
                }
                std::io::ErrorKind::PermissionDenied => {
                    "Check the file permissions or run with a user that can read it"
                }
                _ => "Check that the file is readable and contains valid UTF-8",
            };
            return ErrorContext::from_message(chain).with_suggestion(suggestion);
        }

        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ErrorContext::from_message(chain)
                .with_suggestion("Check the TOML syntax of the configuration file")
                .with_details("Configuration keys live under [compact], [dict_override], [dotted_dict] and [stack_inputs]");
        }
    }

    ErrorContext::from_message(chain)
}

fn create_error_context(error: &FilterError, chain: &str) -> ErrorContext {
    let ctx = ErrorContext::from_message(chain.to_string());
    match error {
        FilterError::MissingField {
            field,
            entry,
        } => ctx
            .with_details(format!("Entry '{entry}' has no '{field}' field"))
            .with_suggestion(format!(
                "Add a '{field}' field to '{entry}', or set on_missing_selector = \"skip\" under [dict_override]"
            )),
        FilterError::MissingInput {
            variable,
            input,
        } => ctx.with_suggestion(format!(
            "Define '{variable}' in the variable store or add a 'Default' to the '{input}' input. \
             Defaults are only used when the environment exists under 'hostvars'"
        )),
        FilterError::PathConflict {
            existing,
            ..
        } => ctx
            .with_details(format!("'{existing}' already holds a value that is not a mapping"))
            .with_suggestion(
                "Remove one of the conflicting keys, or set on_conflict = \"overwrite\" under [dotted_dict]",
            ),
        FilterError::InvalidArgument {
            ..
        }
        | FilterError::InvalidValue {
            ..
        } => ctx.with_suggestion("Check the filter arguments and the value piped into the filter"),
        FilterError::Serialization {
            ..
        } => ctx.with_details("The value could not be encoded as JSON"),
        FilterError::UnknownFilter {
            suggestions,
            ..
        } => {
            if suggestions.is_empty() {
                ctx.with_suggestion(
                    "Available filters: compact, dict_override, dotted_dict, stack_inputs",
                )
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
    }
}

fn tera_error_kind(error: &tera::Error) -> String {
    match &error.kind {
        tera::ErrorKind::Msg(message) => message.clone(),
        tera::ErrorKind::FilterNotFound(name) => format!("filter '{name}' is not registered"),
        other => format!("{other:?}"),
    }
}
