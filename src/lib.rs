//! dbt-extractor - Table metadata from dbt artifacts.
//!
//! Reads the `manifest.json` and `catalog.json` files dbt produces, joins them
//! by node id, enriches each model with its compiled SQL, and emits normalized
//! records for a data catalog.
//!
//! # Features
//!
//! - **Tables and columns**: descriptions from the manifest, types and ordinal
//!   positions from the catalog.
//! - **Compiled SQL**: attached as a programmatic description.
//! - **Provenance**: a source link per model built from a URL prefix.
//! - **Ownership**: owner records and owner tags from `config.owner`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ┌─────────────┐  ┌──────────────────┐
//! │ manifest.json│  │ catalog.json│  │ compiled/*.sql   │
//! └──────┬───────┘  └──────┬──────┘  └────────┬─────────┘
//!        └────────── join by node id ─────────┘
//!                          │
//!              ┌───────────▼───────────┐
//!              │ DbtExtractor (queue)  │──▶ Record, Record, ... None
//!              └───────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use dbt_extractor::{DbtExtractor, ExtractorConfig};
//!
//! fn main() -> dbt_extractor::Result<()> {
//!     let config = ExtractorConfig::default()
//!         .with_manifest("target/manifest.json")
//!         .with_catalog("target/catalog.json");
//!
//!     for record in DbtExtractor::new(config)? {
//!         println!("{}", record.identity());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dbt;
pub mod error;
pub mod extractor;
pub mod models;

pub mod cli;
pub mod observability;
pub mod output;

// Re-exports
pub use config::ExtractorConfig;
pub use error::{ExtractorError, Result};
pub use extractor::{DbtExtractor, ExtractionStats, Extractor, SCOPE};
pub use models::{Record, RecordKind, TableIdentity};
