//! Command-line interface for the dbt extractor.

use crate::config::ExtractorConfig;
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dbt-extractor - Extract table metadata from dbt manifest and catalog files.
#[derive(Parser)]
#[command(name = "dbt-extractor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "DBT_EXTRACTOR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DBT_EXTRACTOR_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract records and print them
    Extract(ExtractArgs),

    /// Print the effective configuration
    Config(ConfigOverrides),

    /// Show version information
    Version,
}

/// Arguments for `extract`.
#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Print extraction statistics to stderr
    #[arg(long)]
    pub stats: bool,
}

/// Options that override configuration file values.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Cluster name stamped into every record
    #[arg(long)]
    pub cluster: Option<String>,

    /// Path to manifest.json
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Path to catalog.json
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory of compiled SQL files
    #[arg(long)]
    pub compiled_dir: Option<PathBuf>,

    /// Prefix for source file URLs
    #[arg(long)]
    pub source_url_prefix: Option<String>,

    /// Only extract models in this schema (case-insensitive)
    #[arg(short, long)]
    pub schema: Option<String>,
}

impl ConfigOverrides {
    /// Overlay the arguments that were given on top of `config`.
    pub fn apply(&self, mut config: ExtractorConfig) -> ExtractorConfig {
        if let Some(cluster) = &self.cluster {
            config = config.with_cluster(cluster.clone());
        }
        if let Some(path) = &self.manifest {
            config = config.with_manifest(path.clone());
        }
        if let Some(path) = &self.catalog {
            config = config.with_catalog(path.clone());
        }
        if let Some(path) = &self.compiled_dir {
            config = config.with_compiled_location(path.clone());
        }
        if let Some(prefix) = &self.source_url_prefix {
            config = config.with_source_url_prefix(prefix.clone());
        }
        if let Some(schema) = &self.schema {
            config = config.with_schema_filter(schema.clone());
        }
        config
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the effective configuration: file, then environment, then flags.
    pub fn resolve_config(
        &self,
        overrides: Option<&ConfigOverrides>,
    ) -> crate::Result<ExtractorConfig> {
        let mut config = ExtractorConfig::load(self.config.as_deref())?;

        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if self.json_logs {
            config.observability.json_logs = true;
        }
        if let Some(overrides) = overrides {
            config = overrides.apply(config);
        }

        config.validate()?;
        Ok(config)
    }
}
