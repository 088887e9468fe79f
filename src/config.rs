//! Query compilation configuration
//!
//! Limits applied to incoming filter/sort requests before they are compiled.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, QueryResult};

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum filter nesting depth, root is depth 1 (default: 64)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of nodes in a filter tree (default: 1024)
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Maximum number of sort keys (default: 16)
    #[serde(default = "default_max_sort_keys")]
    pub max_sort_keys: usize,

    /// Reject fields that are not plain dotted/indexed paths (default: true)
    #[serde(default = "default_strict_field_paths")]
    pub strict_field_paths: bool,
}

fn default_max_depth() -> usize {
    64
}

fn default_max_nodes() -> usize {
    1024
}

fn default_max_sort_keys() -> usize {
    16
}

fn default_strict_field_paths() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            max_sort_keys: default_max_sort_keys(),
            strict_field_paths: default_strict_field_paths(),
        }
    }
}

impl QueryConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// Missing keys take their defaults.
    pub fn from_json(json: &str) -> QueryResult<Self> {
        let config: QueryConfig = serde_json::from_str(json)
            .map_err(|e| QueryError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Config` if the file cannot be read or parsed, or
    /// if a limit is zero.
    pub fn read_from_file(path: &Path) -> QueryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QueryError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// All limits must be positive
    pub fn validate(&self) -> QueryResult<()> {
        let limits = [
            ("max_depth", self.max_depth),
            ("max_nodes", self.max_nodes),
            ("max_sort_keys", self.max_sort_keys),
        ];

        for (name, value) in limits {
            if value == 0 {
                return Err(QueryError::Config(format!("{} must be positive", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = QueryConfig::default();
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.max_nodes, 1024);
        assert_eq!(config.max_sort_keys, 16);
        assert!(config.strict_field_paths);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = QueryConfig::from_json(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_nodes, 1024);
        assert!(config.strict_field_paths);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = QueryConfig::from_json(r#"{"max_sort_keys": 0}"#).unwrap_err();
        assert_eq!(err.code(), "QUERY_CONFIG");
        assert!(err.to_string().contains("max_sort_keys"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = QueryConfig::from_json("{max_depth").unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_nodes": 32, "strict_field_paths": false}}"#).unwrap();

        let config = QueryConfig::read_from_file(file.path()).unwrap();
        assert_eq!(config.max_nodes, 32);
        assert!(!config.strict_field_paths);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = QueryConfig::read_from_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(QueryError::Config(_))));
    }
}
