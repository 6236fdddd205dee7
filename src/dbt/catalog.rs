// dbt catalog decoding

use super::{required, required_object, required_str};
use crate::error::{ExtractorError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Top level of `catalog.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub nodes: HashMap<String, Value>,
}

impl Catalog {
    /// Load and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        super::load_document(path)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Decode the catalog entry for a node, if there is one.
    pub fn node(&self, node_id: &str) -> Result<Option<CatalogNode>> {
        self.nodes
            .get(node_id)
            .map(|value| CatalogNode::from_value(node_id, value))
            .transpose()
    }
}

/// Materialized column as reported by the warehouse.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogColumn {
    pub col_type: String,
    /// Raw ordinal index, coerced on use.
    pub index: Value,
}

impl CatalogColumn {
    /// Ordinal position as an integer. Accepts integers, integral floats within
    /// the `i64` range and numeric strings.
    pub fn sort_order(&self, node_id: &str, column: &str) -> Result<i64> {
        let coerced = match &self.index {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        coerced.ok_or_else(|| ExtractorError::TypeCoercion {
            node: node_id.to_string(),
            column: column.to_string(),
            value: self.index.to_string(),
        })
    }
}

/// Catalog entry for one node. Column keys are upper-cased names.
#[derive(Debug, Clone)]
pub struct CatalogNode {
    pub columns: HashMap<String, CatalogColumn>,
    /// Relation kind from `metadata.type`, e.g. `BASE TABLE` or `VIEW`.
    pub relation_type: String,
}

impl CatalogNode {
    pub fn from_value(node_id: &str, node: &Value) -> Result<Self> {
        let columns = required_object(node_id, node, "columns")?
            .iter()
            .map(|(name, column)| {
                let column_id = format!("{}.columns.{}", node_id, name);
                let column = CatalogColumn {
                    col_type: required_str(&column_id, column, "type")?.to_string(),
                    index: required(&column_id, column, "index")?.clone(),
                };
                Ok((name.clone(), column))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        let metadata = required(node_id, node, "metadata")?;
        let relation_type = required_str(node_id, metadata, "type")?.to_string();

        Ok(Self {
            columns,
            relation_type,
        })
    }

    /// Look up a manifest column by its upper-cased name.
    pub fn column(&self, name: &str) -> Option<&CatalogColumn> {
        self.columns.get(&name.to_uppercase())
    }

    pub fn is_view(&self) -> bool {
        self.relation_type.eq_ignore_ascii_case("VIEW")
    }
}
