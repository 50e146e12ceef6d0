//! Command implementations
//!
//! Each submodule validates and normalises arguments for one command group
//! and forwards to the matching [`crate::arm`] endpoint module.
//!
//! - [`groups`] - Resource groups and template export
//! - [`deployment`] - Template deployment, parameter merging and prompting
//! - [`resource`] - Generic resources, API-version resolution, providers, features
//! - [`policy`] - Policy assignments and definitions
//! - [`lock`] - Management locks
//! - [`link`] - Resource links

pub mod deployment;
pub mod groups;
pub mod link;
pub mod lock;
pub mod policy;
pub mod resource;

use crate::arm::models::{ExportTemplateResult, Tags};
use crate::error::CliError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Treat empty strings like absent arguments
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read a JSON document from a file
pub fn load_json_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    // Files saved by some editors start with a BOM
    serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Interpret a JSON argument: `@path`, an existing file path, or inline JSON
pub fn load_json_arg(arg: &str) -> Result<Value> {
    if let Some(path) = arg.strip_prefix('@') {
        return load_json_file(Path::new(path));
    }
    let path = Path::new(arg);
    if path.is_file() {
        return load_json_file(path);
    }
    serde_json::from_str(arg).map_err(|e| {
        CliError::usage(format!("Failed to parse JSON argument '{}': {}", arg, e)).into()
    })
}

/// A `key[=value]` tag filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub name: String,
    pub value: String,
}

impl TagFilter {
    pub fn parse(arg: &str) -> Self {
        match arg.split_once('=') {
            Some((name, value)) => Self {
                name: name.to_string(),
                value: value.to_string(),
            },
            None => Self {
                name: arg.to_string(),
                value: String::new(),
            },
        }
    }
}

/// Parse `key=value` / `key` words into a tag map
pub fn parse_tags(args: &[String]) -> Tags {
    args.iter()
        .filter(|a| !a.is_empty())
        .map(|a| {
            let tag = TagFilter::parse(a);
            (tag.name, tag.value)
        })
        .collect()
}

/// Pull the template out of an export result, failing on an embedded error
pub(crate) fn exported_template(result: ExportTemplateResult) -> Result<Value, CliError> {
    if let Some(error) = result.error {
        let message = error
            .details
            .first()
            .and_then(|d| d.message.clone())
            .or_else(|| error.message.clone())
            .or_else(|| error.code.clone())
            .unwrap_or_else(|| "Template export failed".to_string());
        return Err(CliError::Api {
            status: 200,
            code: error.code,
            message,
        });
    }
    Ok(result.template.unwrap_or(Value::Null))
}
