// dbt manifest decoding

use super::{required, required_object, required_str, unescape_spaces};
use crate::error::{ExtractorError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Resource type of nodes that become tables.
pub const MODEL_RESOURCE_TYPE: &str = "model";

/// Top level of `manifest.json`. Node order is preserved.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub nodes: IndexMap<String, Value>,
}

impl Manifest {
    /// Load and parse a manifest file.
    pub fn from_path(path: &Path) -> Result<Self> {
        super::load_document(path)
    }

    /// Resource type of a node, required on every node.
    pub fn resource_type<'a>(node_id: &str, node: &'a Value) -> Result<&'a str> {
        required_str(node_id, node, "resource_type")
    }
}

/// Schema of a model. dbt normally writes a string, some adapters a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Name(String),
    Path(Vec<String>),
}

impl Schema {
    pub fn from_value(node_id: &str, node: &Value) -> Result<Self> {
        let invalid = || ExtractorError::InvalidField {
            node: node_id.to_string(),
            field: "schema".to_string(),
            expected: "a string or a list of strings",
        };

        match required(node_id, node, "schema")? {
            Value::String(name) => Ok(Schema::Name(name.clone())),
            Value::Array(parts) => parts
                .iter()
                .map(|p| p.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>>>()
                .map(Schema::Path),
            _ => Err(invalid()),
        }
    }

    /// Case-insensitive match against a schema filter. A list matches when any
    /// element does.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        match self {
            Schema::Name(name) => name.to_lowercase() == filter,
            Schema::Path(parts) => parts.iter().any(|p| p.to_lowercase() == filter),
        }
    }

    /// Single schema name used for table identity.
    pub fn qualified(&self) -> String {
        match self {
            Schema::Name(name) => name.clone(),
            Schema::Path(parts) => parts.join("."),
        }
    }

    /// Tags contributed by the schema.
    pub fn tags(&self) -> Vec<String> {
        match self {
            Schema::Name(name) => vec![name.clone()],
            Schema::Path(parts) => parts.clone(),
        }
    }
}

/// Owner from a node's `config.owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    One(String),
    Many(Vec<String>),
}

impl Owner {
    /// Absent, null and values holding no non-blank owner all mean "no owner".
    pub fn from_value(node_id: &str, value: Option<&Value>) -> Result<Option<Self>> {
        let owner = Self::decode(node_id, value)?;
        Ok(owner.filter(|o| !o.owners().is_empty()))
    }

    fn decode(node_id: &str, value: Option<&Value>) -> Result<Option<Self>> {
        let invalid = |v: &Value| ExtractorError::InvalidOwner {
            node: node_id.to_string(),
            value: v.to_string(),
        };

        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(Owner::One(s.clone()))),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(|| invalid(item)))
                .collect::<Result<Vec<_>>>()
                .map(|owners| Some(Owner::Many(owners))),
            Some(other) => Err(invalid(other)),
        }
    }

    /// Individual owners. A single string may hold a comma separated list.
    pub fn owners(&self) -> Vec<String> {
        let items: Vec<&str> = match self {
            Owner::One(s) => s.split(',').collect(),
            Owner::Many(v) => v.iter().map(String::as_str).collect(),
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Tags contributed by the owner, taken verbatim.
    pub fn tags(&self) -> Vec<String> {
        match self {
            Owner::One(s) => vec![s.clone()],
            Owner::Many(v) => v.clone(),
        }
    }
}

/// A column documented in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestColumn {
    /// Key of the column in the manifest's `columns` mapping.
    pub key: String,
    pub name: String,
    pub description: String,
}

/// A manifest node decoded after it qualified for extraction.
#[derive(Debug, Clone)]
pub struct ManifestNode {
    pub unique_id: String,
    pub schema: Schema,
    pub alias: String,
    pub database: String,
    pub description: String,
    pub raw_sql: String,
    pub columns: Vec<ManifestColumn>,
    pub owner: Option<Owner>,
    pub original_file_path: String,
}

impl ManifestNode {
    /// Decode every consumed field. Descriptions and raw SQL have escaped
    /// spaces normalized.
    pub fn from_value(node_id: &str, node: &Value) -> Result<Self> {
        let columns = required_object(node_id, node, "columns")?
            .iter()
            .map(|(key, column)| {
                let column_id = format!("{}.columns.{}", node_id, key);
                Ok(ManifestColumn {
                    key: key.clone(),
                    name: required_str(&column_id, column, "name")?.to_string(),
                    description: unescape_spaces(required_str(&column_id, column, "description")?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let config = required_object(node_id, node, "config")?;

        // dbt >= 1.3 renamed raw_sql to raw_code
        let raw_sql = match node.get("raw_sql") {
            Some(_) => required_str(node_id, node, "raw_sql")?,
            None => required_str(node_id, node, "raw_code").map_err(|_| {
                ExtractorError::MissingField {
                    node: node_id.to_string(),
                    field: "raw_sql".to_string(),
                }
            })?,
        };

        Ok(Self {
            unique_id: node_id.to_string(),
            schema: Schema::from_value(node_id, node)?,
            alias: required_str(node_id, node, "alias")?.to_string(),
            database: required_str(node_id, node, "database")?.to_string(),
            description: unescape_spaces(required_str(node_id, node, "description")?),
            raw_sql: unescape_spaces(raw_sql),
            columns,
            owner: Owner::from_value(node_id, config.get("owner"))?,
            original_file_path: required_str(node_id, node, "original_file_path")?.to_string(),
        })
    }

    /// Key of the compiled SQL file for this model: `{schema}_{alias}`, lower-cased.
    pub fn compiled_key(&self) -> String {
        format!(
            "{}_{}",
            self.schema.qualified().to_lowercase(),
            self.alias.to_lowercase()
        )
    }
}
