//! Tera templating with the configuration filters.
//!
//! This module renders infrastructure templates (CloudFormation parameter
//! files, stack definitions, configuration snippets) with a variables document
//! as the context and the filters from [`crate::filters`] registered.
//!
//! # Template Context
//!
//! The top-level keys of the variables document become template variables.
//! Several documents can be merged with [`load_vars`]; later documents win.
//!
//! # Custom Filters
//!
//! - `compact`: `{{ tags | compact }}`
//! - `dict_override`: `{{ resources | dict_override(overrides=overrides) }}`
//! - `dotted_dict`: `{{ params | dotted_dict(paths=["Network"]) }}`
//! - `stack_inputs`: `{{ inputs | stack_inputs(environment="prod", vars=root) }}`
//!
//! Filters producing mappings are usually piped into `compact` to be written
//! out as JSON.
//!
//! # Examples
//!
//! ## Parameter file
//!
//! ```text
//! {
//!   "Parameters": {{ stack.inputs | stack_inputs(environment=env, vars=root) | compact }},
//!   "Tags": {{ tags | compact(separators=[", ", ": "]) }}
//! }
//! ```

mod renderer;
mod vars;

pub use renderer::TemplateRenderer;
pub use vars::{DocumentFormat, deep_merge_json, load_vars, load_vars_file, parse_document};
