//! dbt artifact readers.
//!
//! Decodes the two JSON documents dbt writes after `dbt docs generate`:
//! - `manifest.json`: model definitions, descriptions, owners, file paths
//! - `catalog.json`: materialized column types and relation kinds
//!
//! plus the flat directory of compiled SQL files. Nodes are kept as raw JSON
//! until they qualify for extraction, so fields are only required on models
//! that are actually emitted.

pub mod catalog;
pub mod compiled;
pub mod manifest;

pub use catalog::{Catalog, CatalogColumn, CatalogNode};
pub use compiled::{CompiledSqlIndex, COMPILED_SQL_NOT_FOUND};
pub use manifest::{Manifest, ManifestColumn, ManifestNode, Owner, Schema};

use crate::error::{ExtractorError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Read and parse a whole JSON document.
pub(crate) fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| ExtractorError::InputMissing {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| ExtractorError::MalformedInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Look up a key that must be present on a node.
pub(crate) fn required<'a>(node: &str, value: &'a Value, field: &str) -> Result<&'a Value> {
    value.get(field).ok_or_else(|| ExtractorError::MissingField {
        node: node.to_string(),
        field: field.to_string(),
    })
}

/// Look up a key that must be present and hold a string.
pub(crate) fn required_str<'a>(node: &str, value: &'a Value, field: &str) -> Result<&'a str> {
    required(node, value, field)?
        .as_str()
        .ok_or_else(|| ExtractorError::InvalidField {
            node: node.to_string(),
            field: field.to_string(),
            expected: "a string",
        })
}

/// Look up a key that must be present and hold an object.
pub(crate) fn required_object<'a>(
    node: &str,
    value: &'a Value,
    field: &str,
) -> Result<&'a serde_json::Map<String, Value>> {
    required(node, value, field)?
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidField {
            node: node.to_string(),
            field: field.to_string(),
            expected: "an object",
        })
}

/// Replace dbt's escaped spaces (`\ `) with plain spaces.
pub fn unescape_spaces(text: &str) -> String {
    text.replace("\\ ", " ")
}
