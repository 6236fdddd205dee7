// Compiled SQL directory index

use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Text used when a model has no compiled SQL file.
pub const COMPILED_SQL_NOT_FOUND: &str = "Compiled SQL file not found";

/// Extension of compiled SQL files.
pub const COMPILED_SQL_EXTENSION: &str = ".sql";

/// Compiled SQL keyed by lower-cased `{schema}_{alias}`.
#[derive(Debug, Clone, Default)]
pub struct CompiledSqlIndex {
    entries: HashMap<String, String>,
}

impl CompiledSqlIndex {
    /// Scan `dir` non-recursively for `*.sql` files.
    ///
    /// A missing path, or one that is not a directory, yields an empty index.
    /// Unreadable files inside an existing directory are an error.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut entries = HashMap::new();

        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Compiled SQL directory not found, index is empty");
            return Ok(Self { entries });
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(COMPILED_SQL_EXTENSION) else {
                continue;
            };

            let contents = std::fs::read_to_string(&path)?;
            entries.insert(stem.to_lowercase(), contents);
        }

        debug!(dir = %dir.display(), files = entries.len(), "Indexed compiled SQL");
        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: &str, sql: impl Into<String>) {
        self.entries.insert(key.to_lowercase(), sql.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Compiled SQL for a key, or [`COMPILED_SQL_NOT_FOUND`].
    pub fn lookup(&self, key: &str) -> &str {
        self.get(key).unwrap_or(COMPILED_SQL_NOT_FOUND)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
