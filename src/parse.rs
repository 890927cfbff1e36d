//! Config file parsing
//!
//! Files decode into a string-keyed tree of maps, sequences, and scalars.
//! The tree type is [`serde_json::Value`]; YAML content is decoded straight
//! into it, which also enforces that top-level keys are strings.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// A parsed configuration document: top-level names to nested values.
pub type ConfigMap = Map<String, Value>;

/// Supported on-disk formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML, which reads JSON content as well (JSON is a YAML subset).
    Yaml,
    /// JSON, for `.json` files.
    Json,
}

impl Format {
    /// `.json` selects the JSON decoder; every other extension, including
    /// none at all, goes through the YAML decoder.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Read and decode one configuration file into a top-level mapping.
///
/// A null or empty document contributes no keys. Any other non-mapping top
/// level cannot yield configuration names and fails, as does content the
/// decoder rejects outright.
pub fn load_file(path: &Path) -> Result<ConfigMap> {
    let content = fs::read_to_string(path)?;

    let value = match Format::from_path(path) {
        Format::Yaml => {
            serde_yaml::from_str::<Value>(&content).map_err(|e| bad_file(path, &e.to_string()))?
        }
        Format::Json => {
            serde_json::from_str::<Value>(&content).map_err(|e| bad_file(path, &e.to_string()))?
        }
    };

    match value {
        Value::Null => Ok(ConfigMap::new()),
        Value::Object(map) => Ok(map),
        other => {
            bad_file_err(path, &format!("expected a mapping at the top level, found {}", kind(&other)))
        }
    }
}

fn bad_file(path: &Path, message: &str) -> ConfigError {
    ConfigError::BadConfigFile { path: path.to_path_buf(), message: message.to_string() }
}

fn bad_file_err(path: &Path, message: &str) -> Result<ConfigMap> {
    Err(bad_file(path, message))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
