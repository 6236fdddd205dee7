//! Normalized metadata records emitted by the extractor.
//!
//! Every qualifying dbt model yields, in order:
//! 1. [`TableMetadata`]: columns, description, tags, owners
//! 2. [`ProgrammaticDescription`]: the compiled SQL as a description
//! 3. [`TableSource`]: link to the model's source file
//! 4. [`TableOwner`]: only when the model declares an owner
//!
//! All four share one [`TableIdentity`], so they address the same table
//! downstream.

pub mod owner;
pub mod source;
pub mod table;

pub use owner::TableOwner;
pub use source::{TableSource, SOURCE_TYPE_GITHUB};
pub use table::{
    ColumnMetadata, ProgrammaticDescription, TableMetadata, DESCRIPTION_SOURCE_COMPILED_SQL,
};

use serde::Serialize;
use std::fmt;

/// Identity of a table. All parts are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableIdentity {
    pub database: String,
    pub cluster: String,
    pub schema: String,
    pub name: String,
}

impl TableIdentity {
    pub fn new(database: &str, cluster: &str, schema: &str, name: &str) -> Self {
        Self {
            database: database.to_lowercase(),
            cluster: cluster.to_lowercase(),
            schema: schema.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    /// Table key in the form `{db}://{cluster}.{schema}/{name}`.
    pub fn key(&self) -> String {
        format!(
            "{}://{}.{}/{}",
            self.database, self.cluster, self.schema, self.name
        )
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Table,
    ProgrammaticDescription,
    TableSource,
    TableOwner,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Table => "table",
            RecordKind::ProgrammaticDescription => "programmatic_description",
            RecordKind::TableSource => "table_source",
            RecordKind::TableOwner => "table_owner",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Table(TableMetadata),
    ProgrammaticDescription(ProgrammaticDescription),
    TableSource(TableSource),
    TableOwner(TableOwner),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Table(_) => RecordKind::Table,
            Record::ProgrammaticDescription(_) => RecordKind::ProgrammaticDescription,
            Record::TableSource(_) => RecordKind::TableSource,
            Record::TableOwner(_) => RecordKind::TableOwner,
        }
    }

    pub fn identity(&self) -> &TableIdentity {
        match self {
            Record::Table(t) => &t.identity,
            Record::ProgrammaticDescription(d) => &d.identity,
            Record::TableSource(s) => &s.identity,
            Record::TableOwner(o) => &o.identity,
        }
    }

    /// One-line summary of the record's payload.
    pub fn summary(&self) -> String {
        match self {
            Record::Table(t) => format!(
                "{} columns{}, tags [{}]",
                t.columns.len(),
                if t.is_view { " (view)" } else { "" },
                t.tags.join(", ")
            ),
            Record::ProgrammaticDescription(d) => {
                format!("{}: {} bytes", d.description_source, d.description.len())
            }
            Record::TableSource(s) => format!("{}: {}", s.source_type, s.source),
            Record::TableOwner(o) => o.owners.join(", "),
        }
    }

    pub fn as_table(&self) -> Option<&TableMetadata> {
        match self {
            Record::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<TableMetadata> for Record {
    fn from(t: TableMetadata) -> Self {
        Record::Table(t)
    }
}

impl From<ProgrammaticDescription> for Record {
    fn from(d: ProgrammaticDescription) -> Self {
        Record::ProgrammaticDescription(d)
    }
}

impl From<TableSource> for Record {
    fn from(s: TableSource) -> Self {
        Record::TableSource(s)
    }
}

impl From<TableOwner> for Record {
    fn from(o: TableOwner) -> Self {
        Record::TableOwner(o)
    }
}
