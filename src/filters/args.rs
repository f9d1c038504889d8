//! Argument extraction for the Tera filter adapters.
//!
//! Tera hands filters the piped value plus a map of keyword arguments. These
//! helpers turn both into typed borrows and report shape mismatches as
//! [`FilterError`]s naming the offending argument.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::core::{FilterError, json_kind};

pub(crate) type Args = HashMap<String, Value>;

/// Piped value as a mapping.
pub(crate) fn value_as_object<'a>(value: &'a Value) -> Result<&'a Map<String, Value>, FilterError> {
    value.as_object().ok_or_else(|| FilterError::invalid_value("mapping", value))
}

/// Required keyword argument.
pub(crate) fn required<'a>(args: &'a Args, name: &str) -> Result<&'a Value, FilterError> {
    args.get(name).ok_or_else(|| FilterError::InvalidArgument {
        name: name.to_string(),
        reason: "argument is required".to_string(),
    })
}

/// Required mapping argument.
pub(crate) fn required_object<'a>(
    args: &'a Args,
    name: &str,
) -> Result<&'a Map<String, Value>, FilterError> {
    let value = required(args, name)?;
    value.as_object().ok_or_else(|| wrong_type(name, "a mapping", value))
}

/// Optional mapping argument; `null` counts as absent.
pub(crate) fn optional_object<'a>(
    args: &'a Args,
    name: &str,
) -> Result<Option<&'a Map<String, Value>>, FilterError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(wrong_type(name, "a mapping", other)),
    }
}

/// Required string argument.
pub(crate) fn required_str<'a>(args: &'a Args, name: &str) -> Result<&'a str, FilterError> {
    let value = required(args, name)?;
    value.as_str().ok_or_else(|| wrong_type(name, "a string", value))
}

/// Optional string argument; `null` counts as absent.
pub(crate) fn optional_str<'a>(args: &'a Args, name: &str) -> Result<Option<&'a str>, FilterError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(wrong_type(name, "a string", other)),
    }
}

/// Optional boolean argument; `null` counts as absent.
pub(crate) fn optional_bool(args: &Args, name: &str) -> Result<Option<bool>, FilterError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(wrong_type(name, "a boolean", other)),
    }
}

/// Optional list of strings. A single string is accepted as a one-element list.
pub(crate) fn optional_str_list(args: &Args, name: &str) -> Result<Option<Vec<String>>, FilterError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| wrong_type(name, "a list of strings", item))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(wrong_type(name, "a list of strings", other)),
    }
}

fn wrong_type(name: &str, expected: &str, found: &Value) -> FilterError {
    FilterError::InvalidArgument {
        name: name.to_string(),
        reason: format!("expected {expected}, got {}", json_kind(found)),
    }
}
