//! # Sort Plans
//!
//! Validates requested sort keys and renders them as an ordering clause
//! (`"age desc,name asc"`). Key order is the caller's; it is never reordered.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::errors::{QueryError, QueryResult};
use crate::path::FieldPath;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses a direction token (case-sensitive)
    pub fn from_token(token: &str) -> QueryResult<Self> {
        match token {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(QueryError::InvalidSortDirection(token.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Requested sort key, as it arrives in a request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub field: String,

    #[serde(default, alias = "dir")]
    pub direction: String,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, "asc")
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, "desc")
    }
}

/// Validated sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Validated ordering, rendered through `Display`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortPlan {
    keys: Vec<SortKey>,
}

impl SortPlan {
    /// Validates every spec before building anything.
    ///
    /// # Errors
    ///
    /// `InvalidField` for an empty (or, with strict paths, malformed) field,
    /// `InvalidSortDirection` for a direction other than `asc`/`desc`,
    /// `TooManySortKeys` above the configured limit.
    pub fn build(specs: &[SortSpec], config: &QueryConfig) -> QueryResult<Self> {
        Self::validate(specs, config).inspect_err(|e| {
            warn!(code = e.code(), error = %e, "Sort rejected");
        })?;

        let keys = specs
            .iter()
            .map(|spec| {
                Ok(SortKey {
                    field: spec.field.clone(),
                    direction: SortDirection::from_token(&spec.direction)?,
                })
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let plan = Self { keys };
        debug!(ordering = %plan, "Built sort plan");
        Ok(plan)
    }

    fn validate(specs: &[SortSpec], config: &QueryConfig) -> QueryResult<()> {
        if specs.len() > config.max_sort_keys {
            return Err(QueryError::TooManySortKeys(
                specs.len(),
                config.max_sort_keys,
            ));
        }

        for spec in specs {
            if spec.field.is_empty() {
                return Err(QueryError::InvalidField(String::new()));
            }
            if config.strict_field_paths {
                FieldPath::parse(&spec.field)?;
            }
            SortDirection::from_token(&spec.direction)?;
        }

        Ok(())
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// An empty plan leaves ordering unchanged
    pub fn is_identity(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for SortPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{} {}", key.field, key.direction.as_str())?;
        }
        Ok(())
    }
}

/// Builds an ordering clause with the default configuration
pub fn build_sort(specs: &[SortSpec]) -> QueryResult<String> {
    SortPlan::build(specs, &QueryConfig::default()).map(|plan| plan.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_clause() {
        let specs = vec![SortSpec::desc("age"), SortSpec::asc("name")];
        assert_eq!(build_sort(&specs).unwrap(), "age desc,name asc");
    }

    #[test]
    fn test_caller_order_preserved() {
        let specs = vec![
            SortSpec::asc("z"),
            SortSpec::asc("a"),
            SortSpec::desc("m"),
        ];
        assert_eq!(build_sort(&specs).unwrap(), "z asc,a asc,m desc");
    }

    #[test]
    fn test_empty_is_identity() {
        let plan = SortPlan::build(&[], &QueryConfig::default()).unwrap();
        assert!(plan.is_identity());
        assert_eq!(plan.to_string(), "");
    }

    #[test]
    fn test_invalid_direction_for_any_field() {
        for field in ["age", "address.city", "tags[0]"] {
            for direction in ["", "ASC", "up", "descending"] {
                assert_eq!(
                    build_sort(&[SortSpec::new(field, direction)]),
                    Err(QueryError::InvalidSortDirection(direction.to_string()))
                );
            }
        }
    }

    #[test]
    fn test_validation_is_all_or_nothing() {
        let specs = vec![SortSpec::asc("age"), SortSpec::new("", "asc")];
        assert_eq!(
            build_sort(&specs),
            Err(QueryError::InvalidField(String::new()))
        );
    }

    #[test]
    fn test_malformed_field_rejected() {
        assert_eq!(
            build_sort(&[SortSpec::asc("age, password")]),
            Err(QueryError::InvalidField("age, password".to_string()))
        );
    }

    #[test]
    fn test_sort_key_limit() {
        let config = QueryConfig {
            max_sort_keys: 1,
            ..Default::default()
        };
        let specs = vec![SortSpec::asc("a"), SortSpec::asc("b")];
        assert_eq!(
            SortPlan::build(&specs, &config),
            Err(QueryError::TooManySortKeys(2, 1))
        );
    }

    #[test]
    fn test_deserialize_dir_alias() {
        let spec: SortSpec =
            serde_json::from_str(r#"{"field": "age", "dir": "desc"}"#).unwrap();
        assert_eq!(spec, SortSpec::desc("age"));
    }
}
