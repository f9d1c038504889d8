//! Apply a single filter to a document outside of any template.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::FilterConfig;
use crate::filters::{FilterKind, Separators, apply_filter, compact};
use crate::templating::{DocumentFormat, load_vars_file, parse_document};

/// Run one filter over an input document and print the result.
///
/// Arguments mirror the keyword arguments the filter takes in a template.
///
/// # Examples
///
/// ```bash
/// # Override resources by their Type field
/// stack-filters apply dict_override --input resources.yaml --arg-file overrides=overrides.yaml
///
/// # Custom separators, reading the value from stdin
/// echo '{"a": [1, 2]}' | stack-filters apply compact --arg 'separators=[", ", ": "]'
/// ```
#[derive(Args, Debug)]
pub struct ApplyCommand {
    /// Filter to apply (compact, dict_override, dotted_dict, stack_inputs)
    filter: String,

    /// Input document; read from stdin when omitted or `-`
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Filter argument as KEY=VALUE; VALUE is parsed as JSON, falling back to a string
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    args: Vec<(String, Value)>,

    /// Filter argument read from a document as KEY=FILE
    #[arg(long = "arg-file", value_name = "KEY=FILE", value_parser = parse_key_path)]
    arg_files: Vec<(String, PathBuf)>,

    /// Pretty-print mapping and sequence results
    #[arg(long)]
    pretty: bool,
}

impl ApplyCommand {
    pub fn execute(self, config: FilterConfig) -> Result<()> {
        let output = self.run(&config)?;
        println!("{output}");
        Ok(())
    }

    fn run(&self, config: &FilterConfig) -> Result<String> {
        let kind: FilterKind = self.filter.parse()?;
        let input = self.read_input()?;
        let args = self.collect_args()?;

        tracing::debug!("Applying {} with arguments {:?}", kind, args.keys().collect::<Vec<_>>());
        let result = apply_filter(kind, &input, &args, config)?;

        self.format_result(&result, config)
    }

    fn read_input(&self) -> Result<Value> {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => load_vars_file(path),
            _ => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read input from stdin")?;
                // YAML also accepts JSON documents.
                parse_document(&content, DocumentFormat::Yaml)
                    .context("Failed to parse input from stdin")
            }
        }
    }

    fn collect_args(&self) -> Result<HashMap<String, Value>> {
        let mut args: HashMap<String, Value> = self.args.iter().cloned().collect();

        for (key, path) in &self.arg_files {
            let value = load_vars_file(path)
                .with_context(|| format!("Failed to load argument '{key}'"))?;
            args.insert(key.clone(), value);
        }

        Ok(args)
    }

    fn format_result(&self, result: &Value, config: &FilterConfig) -> Result<String> {
        match result {
            // `compact` already produced text; print it as-is.
            Value::String(text) => Ok(text.clone()),
            _ if self.pretty => {
                serde_json::to_string_pretty(result).context("Failed to serialize result")
            }
            _ => Ok(compact(result, &Separators::from(&config.compact))?),
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = split_assignment(raw)?;
    let parsed = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), parsed))
}

fn parse_key_path(raw: &str) -> Result<(String, PathBuf), String> {
    let (key, path) = split_assignment(raw)?;
    Ok((key.to_string(), PathBuf::from(path)))
}

fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
