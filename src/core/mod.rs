//! Core types for stack-filters
//!
//! This module holds the error model shared by the filters, the renderer and
//! the CLI:
//! - [`FilterError`] - Enumerated failures a filter can raise
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use stack_filters::core::{FilterError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(FilterError::UnknownFilter {
//!         name: "compat".to_string(),
//!         suggestions: vec!["compact".to_string()],
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert_eq!(friendly.suggestion.as_deref(), Some("Did you mean: compact?"));
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, FilterError, json_kind, user_friendly_error};
