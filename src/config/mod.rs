//! Configuration module for the dbt extractor.

use crate::error::{ExtractorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default cluster name stamped into every record.
pub const DEFAULT_CLUSTER_NAME: &str = "master";
/// Default manifest location.
pub const DEFAULT_MANIFEST_FILE_LOCATION: &str = "manifest.json";
/// Default catalog location.
pub const DEFAULT_CATALOG_FILE_LOCATION: &str = "catalog.json";
/// Default compiled-SQL directory.
pub const DEFAULT_COMPILED_LOCATION: &str = "/var/tmp/amundsen/tables/compiled/";

/// Extraction settings. Built once and passed by value to the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Cluster name stamped into every output record.
    #[serde(default = "default_cluster")]
    pub cluster: String,
    /// Path to dbt's `manifest.json`.
    #[serde(default = "default_manifest")]
    pub manifest_file_location: PathBuf,
    /// Path to dbt's `catalog.json`.
    #[serde(default = "default_catalog")]
    pub catalog_file_location: PathBuf,
    /// Directory of compiled `*.sql` files named `{schema}_{alias}.sql`.
    #[serde(default = "default_compiled")]
    pub compiled_location: PathBuf,
    /// Prefix joined with each model's original file path.
    #[serde(default)]
    pub source_url_prefix: String,
    /// Restrict extraction to one schema. Empty means no filter.
    #[serde(default)]
    pub schema_filter: String,
    /// Logging configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_cluster() -> String {
    DEFAULT_CLUSTER_NAME.to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_FILE_LOCATION)
}

fn default_catalog() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_FILE_LOCATION)
}

fn default_compiled() -> PathBuf {
    PathBuf::from(DEFAULT_COMPILED_LOCATION)
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            cluster: default_cluster(),
            manifest_file_location: default_manifest(),
            catalog_file_location: default_catalog(),
            compiled_location: default_compiled(),
            source_url_prefix: String::new(),
            schema_filter: String::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parse configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    /// Not validated here: [`ExtractorConfig::load`] validates once the
    /// environment overrides are applied.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractorError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = if path.extension().map_or(false, |e| e == "json") {
            serde_json::from_str(&content).map_err(|e| {
                ExtractorError::Config(format!("Failed to parse config: {}", e))
            })?
        } else {
            toml::from_str(&content)?
        };

        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(cluster) = std::env::var("DBT_EXTRACTOR_CLUSTER") {
            self.cluster = cluster;
        }
        if let Ok(path) = std::env::var("DBT_EXTRACTOR_MANIFEST") {
            self.manifest_file_location = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("DBT_EXTRACTOR_CATALOG") {
            self.catalog_file_location = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("DBT_EXTRACTOR_COMPILED_DIR") {
            self.compiled_location = PathBuf::from(path);
        }
        if let Ok(prefix) = std::env::var("DBT_EXTRACTOR_SOURCE_URL_PREFIX") {
            self.source_url_prefix = prefix;
        }
        if let Ok(filter) = std::env::var("DBT_EXTRACTOR_SCHEMA_FILTER") {
            self.schema_filter = filter;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cluster.trim().is_empty() {
            return Err(ExtractorError::InvalidConfig {
                field: "cluster".to_string(),
                reason: "Cluster name must be non-empty".to_string(),
            });
        }

        if self.manifest_file_location.as_os_str().is_empty() {
            return Err(ExtractorError::InvalidConfig {
                field: "manifest_file_location".to_string(),
                reason: "Manifest path must be non-empty".to_string(),
            });
        }

        if self.catalog_file_location.as_os_str().is_empty() {
            return Err(ExtractorError::InvalidConfig {
                field: "catalog_file_location".to_string(),
                reason: "Catalog path must be non-empty".to_string(),
            });
        }

        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ExtractorError::Serialization(e.to_string()))
    }

    /// Whether a schema filter is active.
    pub fn has_schema_filter(&self) -> bool {
        !self.schema_filter.is_empty()
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = cluster.into();
        self
    }

    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_file_location = path.into();
        self
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_file_location = path.into();
        self
    }

    pub fn with_compiled_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.compiled_location = path.into();
        self
    }

    pub fn with_source_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.source_url_prefix = prefix.into();
        self
    }

    pub fn with_schema_filter(mut self, filter: impl Into<String>) -> Self {
        self.schema_filter = filter.into();
        self
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Enable JSON logging.
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}
