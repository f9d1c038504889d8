//! `compact`: minified JSON with configurable separators.
//!
//! ```text
//! {{ tags | compact }}                          -> {"Env":"prod","Team":"infra"}
//! {{ tags | compact(separators=[", ", ": "]) }} -> {"Env": "prod", "Team": "infra"}
//! {{ name | compact(ensure_ascii=true) }}        -> "Z\u00fcrich"
//! ```
//!
//! Non-ASCII text is written as UTF-8 unless `ensure_ascii` is set, either per
//! call or under `[compact]` in the configuration.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::Formatter;
use std::io;

use super::args::{Args, optional_bool, optional_str, optional_str_list};
use crate::config::FilterConfig;
use crate::core::FilterError;

/// Item and key separators written by [`compact`], plus how strings are escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    /// Between sequence items and between mapping entries
    pub item: String,
    /// Between a mapping key and its value
    pub key: String,
    /// Escape characters outside printable ASCII as `\uXXXX` (UTF-16 units)
    pub ensure_ascii: bool,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            item: crate::constants::DEFAULT_ITEM_SEPARATOR.to_string(),
            key: crate::constants::DEFAULT_KEY_SEPARATOR.to_string(),
            ensure_ascii: false,
        }
    }
}

impl Separators {
    pub fn new(item: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            key: key.into(),
            ensure_ascii: false,
        }
    }

    #[must_use]
    pub fn with_ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }
}

impl From<&crate::config::CompactConfig> for Separators {
    fn from(config: &crate::config::CompactConfig) -> Self {
        Self::new(&config.item_separator, &config.key_separator)
            .with_ensure_ascii(config.ensure_ascii)
    }
}

/// serde_json formatter that writes no whitespace except the caller's separators.
struct SeparatorFormatter<'a> {
    separators: &'a Separators,
}

impl Formatter for SeparatorFormatter<'_> {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(self.separators.item.as_bytes())
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(self.separators.item.as_bytes())
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(self.separators.key.as_bytes())
    }

    // Quotes, backslashes and control characters never reach this point;
    // serde_json escapes them through `write_char_escape`.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.separators.ensure_ascii || fragment.bytes().all(|b| (b' '..=b'~').contains(&b)) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` to JSON text using `separators`.
///
/// Mapping entries keep their insertion order.
///
/// # Errors
///
/// Returns [`FilterError::Serialization`] when serde_json rejects the value,
/// for example a map whose keys are not strings.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stack_filters::filters::{Separators, compact};
///
/// let text = compact(&json!({"a": [1, 2], "b": null}), &Separators::default()).unwrap();
/// assert_eq!(text, r#"{"a":[1,2],"b":null}"#);
/// ```
pub fn compact<T>(value: &T, separators: &Separators) -> Result<String, FilterError>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut buffer,
        SeparatorFormatter {
            separators,
        },
    );
    value.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| FilterError::Serialization {
        message: e.to_string(),
    })
}

/// Tera entry point: `separators=[item, key]` or `item_separator=`/`key_separator=`.
pub(crate) fn apply(value: &Value, args: &Args, config: &FilterConfig) -> Result<Value, FilterError> {
    let mut separators = Separators::from(&config.compact);

    if let Some(pair) = optional_str_list(args, "separators")? {
        match pair.as_slice() {
            [item, key] => separators = Separators::new(item, key),
            _ => {
                return Err(FilterError::InvalidArgument {
                    name: "separators".to_string(),
                    reason: format!("expected [item, key], got {} element(s)", pair.len()),
                });
            }
        }
    }
    if let Some(item) = optional_str(args, "item_separator")? {
        separators.item = item.to_string();
    }
    if let Some(key) = optional_str(args, "key_separator")? {
        separators.key = key.to_string();
    }
    if let Some(ensure_ascii) = optional_bool(args, "ensure_ascii")? {
        separators.ensure_ascii = ensure_ascii;
    }

    compact(value, &separators).map(Value::String)
}
