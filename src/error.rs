//! Error types for the dbt extractor.
//!
//! This module provides a unified error type [`ExtractorError`] for loading and
//! joining dbt artifacts, along with a convenient [`Result`] type alias.
//!
//! # Error Categories
//!
//! - **Input**: the manifest or catalog file is absent, unreadable or not JSON
//! - **Node**: a qualifying model is missing a field, or carries a value that
//!   cannot be coerced (ordinal index, owner)
//! - **Configuration**: the configuration file cannot be loaded or is invalid
//!
//! None of these are retried. The compiled-SQL directory being absent is not an
//! error at all.
//!
//! # Example
//!
//! ```rust
//! use dbt_extractor::error::{ExtractorError, Result};
//!
//! fn require_cluster(cluster: &str) -> Result<()> {
//!     if cluster.is_empty() {
//!         return Err(ExtractorError::InvalidConfig {
//!             field: "cluster".into(),
//!             reason: "cluster name cannot be empty".into(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_cluster("").is_err());
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction.
#[derive(Error, Debug)]
pub enum ExtractorError {
    // Input document errors
    #[error("Cannot read {}: {source}", path.display())]
    InputMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    // Per-node errors
    #[error("Node {node}: missing field {field}")]
    MissingField { node: String, field: String },

    #[error("Node {node}: field {field} must be {expected}")]
    InvalidField {
        node: String,
        field: String,
        expected: &'static str,
    },

    #[error("Node {node}: column {column} has non-integer index {value}")]
    TypeCoercion {
        node: String,
        column: String,
        value: String,
    },

    #[error("Node {node}: owner must be a string or a list of strings, got {value}")]
    InvalidOwner { node: String, value: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // External errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ExtractorError {
    /// Whether the error came from reading or parsing an input document.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ExtractorError::InputMissing { .. } | ExtractorError::MalformedInput { .. }
        )
    }

    /// Short, stable category name used in log fields.
    pub fn category(&self) -> &'static str {
        match self {
            ExtractorError::InputMissing { .. } => "input_missing",
            ExtractorError::MalformedInput { .. }
            | ExtractorError::MissingField { .. }
            | ExtractorError::InvalidField { .. } => "malformed_input",
            ExtractorError::TypeCoercion { .. } | ExtractorError::InvalidOwner { .. } => {
                "type_coercion"
            }
            ExtractorError::Config(_) | ExtractorError::InvalidConfig { .. } => "config",
            ExtractorError::Io(_) => "io",
            ExtractorError::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::Config(e.to_string())
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = ExtractorError::MissingField {
            node: "model.shop.users".into(),
            field: "description".into(),
        };
        assert_eq!(err.category(), "malformed_input");
        assert!(!err.is_input_error());
        assert_eq!(err.to_string(), "Node model.shop.users: missing field description");

        let err = ExtractorError::InputMissing {
            path: PathBuf::from("manifest.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.is_input_error());
        assert_eq!(err.category(), "input_missing");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ExtractorError = json_err.into();
        assert_eq!(err.category(), "serialization");
    }
}
