// Table and column records

use super::TableIdentity;
use serde::Serialize;

/// Description source label for compiled SQL descriptions.
pub const DESCRIPTION_SOURCE_COMPILED_SQL: &str = "compiled_sql";

/// A column joined from manifest and catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub description: String,
    pub col_type: String,
    pub sort_order: i64,
}

impl ColumnMetadata {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        col_type: impl Into<String>,
        sort_order: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            col_type: col_type.into(),
            sort_order,
        }
    }
}

/// Table record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    #[serde(flatten)]
    pub identity: TableIdentity,
    pub description: String,
    pub owners: Vec<String>,
    /// Ordered by `sort_order`.
    pub columns: Vec<ColumnMetadata>,
    pub is_view: bool,
    pub tags: Vec<String>,
}

impl TableMetadata {
    pub fn new(identity: TableIdentity, description: impl Into<String>) -> Self {
        Self {
            identity,
            description: description.into(),
            owners: Vec::new(),
            columns: Vec::new(),
            is_view: false,
            tags: Vec::new(),
        }
    }

    pub fn with_owners(mut self, owners: Vec<String>) -> Self {
        self.owners = owners;
        self
    }

    /// Sets columns, sorted by ordinal position.
    pub fn with_columns(mut self, mut columns: Vec<ColumnMetadata>) -> Self {
        columns.sort_by_key(|c| c.sort_order);
        self.columns = columns;
        self
    }

    pub fn with_view(mut self, is_view: bool) -> Self {
        self.is_view = is_view;
        self
    }

    /// Adds tags, skipping ones already present.
    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for tag in tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }
}

/// Description produced by a program rather than a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammaticDescription {
    #[serde(flatten)]
    pub identity: TableIdentity,
    pub description_source: String,
    pub description: String,
}

impl ProgrammaticDescription {
    /// Compiled SQL description. Backslashes are doubled.
    pub fn compiled_sql(identity: TableIdentity, sql: &str) -> Self {
        Self {
            identity,
            description_source: DESCRIPTION_SOURCE_COMPILED_SQL.to_string(),
            description: sql.replace('\\', "\\\\"),
        }
    }
}
