// Table source record

use super::TableIdentity;
use serde::Serialize;

/// Source type label for model files.
pub const SOURCE_TYPE_GITHUB: &str = "github";

/// Where the table's definition lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSource {
    #[serde(flatten)]
    pub identity: TableIdentity,
    pub source: String,
    pub source_type: String,
}

impl TableSource {
    /// Source URL is `{prefix}/{original_file_path}`.
    pub fn github(identity: TableIdentity, prefix: &str, original_file_path: &str) -> Self {
        Self {
            identity,
            source: format!("{}/{}", prefix, original_file_path),
            source_type: SOURCE_TYPE_GITHUB.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_url() {
        let identity = TableIdentity::new("db", "master", "public", "users");

        let source = TableSource::github(
            identity.clone(),
            "https://github.com/acme/dbt/blob/main",
            "models/users.sql",
        );
        assert_eq!(source.source, "https://github.com/acme/dbt/blob/main/models/users.sql");
        assert_eq!(source.source_type, "github");

        let source = TableSource::github(identity, "", "models/users.sql");
        assert_eq!(source.source, "/models/users.sql");
    }
}
