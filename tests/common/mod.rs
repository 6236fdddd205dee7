//! Common test utilities for integration tests.

pub mod fixtures;

use dbt_extractor::ExtractorConfig;
use std::path::PathBuf;
use tempfile::TempDir;

pub use fixtures::*;

/// Test environment holding a dbt `target/` directory.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub target_dir: PathBuf,
    pub compiled_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target_dir = temp_dir.path().join("target");
        let compiled_dir = target_dir.join("compiled");

        std::fs::create_dir_all(&target_dir).expect("Failed to create target dir");

        Self {
            temp_dir,
            target_dir,
            compiled_dir,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.target_dir.join("manifest.json")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.target_dir.join("catalog.json")
    }

    /// Write both documents of a project.
    pub fn write_project(&self, project: &ProjectFixture) {
        std::fs::write(self.manifest_path(), project.manifest().to_string())
            .expect("Failed to write manifest");
        std::fs::write(self.catalog_path(), project.catalog().to_string())
            .expect("Failed to write catalog");
    }

    /// Write a compiled SQL file, creating the directory on first use.
    pub fn write_compiled(&self, file_name: &str, sql: &str) {
        std::fs::create_dir_all(&self.compiled_dir).expect("Failed to create compiled dir");
        std::fs::write(self.compiled_dir.join(file_name), sql)
            .expect("Failed to write compiled SQL");
    }

    /// Configuration pointing at this environment's files.
    pub fn config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
            .with_manifest(self.manifest_path())
            .with_catalog(self.catalog_path())
            .with_compiled_location(&self.compiled_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
