//! stack-filters - configuration transformation filters for infrastructure templates
//!
//! Four filters reshape configuration data while a template is rendered:
//!
//! - `compact` - serialize any value to minified JSON with configurable separators
//! - `dict_override` - re-key an override table by the selector field (default
//!   `Type`) of each source entry
//! - `dotted_dict` - expand dotted keys such as `Network.Cidr` into nested mappings
//! - `stack_inputs` - resolve stack input values from a variable store, falling
//!   back to each input's `Default`
//!
//! The filters are plain functions over [`serde_json::Value`] and are also
//! registered into [Tera](https://keats.github.io/tera/) by
//! [`filters::register_filters`]. The `stack-filters` binary renders template
//! files or applies a single filter to a document.
//!
//! # Core Modules
//!
//! - [`filters`] - The filters, their argument handling and Tera registration
//! - [`templating`] - Template rendering and variables documents
//! - [`config`] - Filter defaults and policies loaded from `stack-filters.toml`
//! - [`core`] - Error types and user-facing error reporting
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use stack_filters::config::FilterConfig;
//! use stack_filters::templating::TemplateRenderer;
//!
//! let mut renderer = TemplateRenderer::new(FilterConfig::default());
//! let vars = json!({"params": {"Network.Cidr": "10.0.0.0/16"}});
//! let output = renderer
//!     .render_str(r#"{{ params | dotted_dict(paths=["Network"]) | compact }}"#, &vars)
//!     .unwrap();
//! assert_eq!(output, r#"{"Network":{"Cidr":"10.0.0.0/16"}}"#);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod filters;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
