//! Joins dbt's manifest and catalog into metadata records.
//!
//! All work happens in [`DbtExtractor::new`]: both documents are loaded, the
//! compiled SQL directory is indexed, and every record is built up front.
//! Afterwards the extractor only drains its queue.
//!
//! # Example
//!
//! ```no_run
//! use dbt_extractor::{DbtExtractor, Extractor, ExtractorConfig};
//!
//! let config = ExtractorConfig::default()
//!     .with_manifest("target/manifest.json")
//!     .with_catalog("target/catalog.json")
//!     .with_schema_filter("analytics");
//!
//! let mut extractor = DbtExtractor::new(config)?;
//! while let Some(record) = extractor.extract() {
//!     println!("{} {}", record.kind(), record.identity());
//! }
//! # Ok::<(), dbt_extractor::ExtractorError>(())
//! ```

use crate::config::ExtractorConfig;
use crate::dbt::manifest::MODEL_RESOURCE_TYPE;
use crate::dbt::{Catalog, CatalogNode, CompiledSqlIndex, Manifest, ManifestNode, Schema};
use crate::error::Result;
use crate::models::{
    ColumnMetadata, ProgrammaticDescription, Record, TableIdentity, TableMetadata, TableOwner,
    TableSource,
};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

/// Scope identifier of the dbt extractor.
pub const SCOPE: &str = "extractor.dbt";

/// A pull-based source of records.
pub trait Extractor {
    /// Next record, or `None` once exhausted. Keeps returning `None` after that.
    fn extract(&mut self) -> Option<Record>;

    /// Identifier of this extractor for the host pipeline.
    fn scope(&self) -> &'static str;
}

/// Counters collected while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Manifest nodes examined
    pub nodes_seen: u64,
    /// Models turned into records
    pub models_extracted: u64,
    /// Skipped because resource type is not `model`
    pub skipped_not_model: u64,
    /// Skipped because the node is absent from the catalog
    pub skipped_not_in_catalog: u64,
    /// Skipped by the schema filter
    pub skipped_by_schema: u64,
    /// Records queued
    pub records_emitted: u64,
}

/// Extractor over dbt artifacts.
#[derive(Debug)]
pub struct DbtExtractor {
    config: ExtractorConfig,
    records: VecDeque<Record>,
    stats: ExtractionStats,
}

impl DbtExtractor {
    /// Load the configured files and build every record.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let manifest = Manifest::from_path(&config.manifest_file_location)?;
        let catalog = Catalog::from_path(&config.catalog_file_location)?;
        let compiled = CompiledSqlIndex::scan(&config.compiled_location)?;

        Self::from_parts(config, &manifest, &catalog, &compiled)
    }

    /// Build records from documents that are already loaded.
    pub fn from_parts(
        config: ExtractorConfig,
        manifest: &Manifest,
        catalog: &Catalog,
        compiled: &CompiledSqlIndex,
    ) -> Result<Self> {
        let mut builder = RecordBuilder {
            config: &config,
            catalog,
            compiled,
            records: VecDeque::new(),
            stats: ExtractionStats::default(),
        };

        for (node_id, node) in &manifest.nodes {
            builder.visit(node_id, node)?;
        }

        let RecordBuilder {
            records, mut stats, ..
        } = builder;
        stats.records_emitted = records.len() as u64;

        info!(
            models = stats.models_extracted,
            records = stats.records_emitted,
            nodes = stats.nodes_seen,
            compiled_sql_files = compiled.len(),
            "Loaded dbt artifacts"
        );

        Ok(Self {
            config,
            records,
            stats,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Records not yet extracted.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl Extractor for DbtExtractor {
    fn extract(&mut self) -> Option<Record> {
        self.records.pop_front()
    }

    fn scope(&self) -> &'static str {
        SCOPE
    }
}

impl Iterator for DbtExtractor {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.extract()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.records.len(), Some(self.records.len()))
    }
}

impl ExactSizeIterator for DbtExtractor {}

struct RecordBuilder<'a> {
    config: &'a ExtractorConfig,
    catalog: &'a Catalog,
    compiled: &'a CompiledSqlIndex,
    records: VecDeque<Record>,
    stats: ExtractionStats,
}

impl RecordBuilder<'_> {
    fn visit(&mut self, node_id: &str, node: &serde_json::Value) -> Result<()> {
        self.stats.nodes_seen += 1;

        if Manifest::resource_type(node_id, node)? != MODEL_RESOURCE_TYPE {
            self.stats.skipped_not_model += 1;
            return Ok(());
        }

        if !self.catalog.contains(node_id) {
            debug!(node = node_id, "Skipping model missing from catalog");
            self.stats.skipped_not_in_catalog += 1;
            return Ok(());
        }

        if self.config.has_schema_filter()
            && !Schema::from_value(node_id, node)?.matches(&self.config.schema_filter)
        {
            debug!(node = node_id, filter = %self.config.schema_filter, "Skipping model outside schema filter");
            self.stats.skipped_by_schema += 1;
            return Ok(());
        }

        // Only qualifying nodes are decoded on either side.
        let Some(catalog_node) = self.catalog.node(node_id)? else {
            return Ok(());
        };
        let model = ManifestNode::from_value(node_id, node)?;
        self.emit(&model, &catalog_node)?;
        self.stats.models_extracted += 1;
        Ok(())
    }

    fn emit(&mut self, model: &ManifestNode, catalog_node: &CatalogNode) -> Result<()> {
        let schema = model.schema.qualified();
        info!(schema = %schema, alias = %model.alias, "Extracting dbt model");
        debug!(node = %model.unique_id, raw_sql_bytes = model.raw_sql.len(), "Decoded model");

        let columns = join_columns(model, catalog_node)?;
        if columns.is_empty() {
            warn!(node = %model.unique_id, "No manifest columns matched the catalog");
        }

        let identity = TableIdentity::new(&model.database, &self.config.cluster, &schema, &model.alias);
        let owners = model.owner.as_ref().map(|o| o.owners()).unwrap_or_default();

        let mut tags = model.schema.tags();
        if let Some(owner) = &model.owner {
            tags.extend(owner.tags());
        }

        let table = TableMetadata::new(identity.clone(), model.description.clone())
            .with_owners(owners.clone())
            .with_columns(columns)
            .with_view(catalog_node.is_view())
            .with_tags(tags);
        self.records.push_back(table.into());

        let compiled_sql = self.compiled.lookup(&model.compiled_key());
        self.records
            .push_back(ProgrammaticDescription::compiled_sql(identity.clone(), compiled_sql).into());

        self.records.push_back(
            TableSource::github(
                identity.clone(),
                &self.config.source_url_prefix,
                &model.original_file_path,
            )
            .into(),
        );

        if !owners.is_empty() {
            self.records.push_back(TableOwner::new(identity, owners).into());
        }

        Ok(())
    }
}

/// Columns present in both documents, matched on upper-cased name. The first
/// manifest column wins when two differ only by case.
fn join_columns(model: &ManifestNode, catalog_node: &CatalogNode) -> Result<Vec<ColumnMetadata>> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();

    for column in &model.columns {
        let upper = column.key.to_uppercase();
        let Some(catalog_column) = catalog_node.column(&upper) else {
            continue;
        };
        if !seen.insert(upper.clone()) {
            continue;
        }

        columns.push(ColumnMetadata::new(
            column.name.clone(),
            column.description.clone(),
            catalog_column.col_type.clone(),
            catalog_column.sort_order(&model.unique_id, &upper)?,
        ));
    }

    Ok(columns)
}
