//! Dynamic query request

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, QueryResult};
use crate::filter::FilterNode;
use crate::sort::SortSpec;

/// Filter and sort request, typically deserialized from a request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicQuery {
    /// Root of the filter tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,

    /// Sort keys, applied in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortSpec>>,
}

impl DynamicQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query from a JSON request body.
    ///
    /// Only the shape is checked here; tokens are validated on compilation.
    pub fn from_json(json: &str) -> QueryResult<Self> {
        serde_json::from_str(json).map_err(|e| QueryError::InvalidRequest(e.to_string()))
    }

    pub fn with_filter(mut self, filter: FilterNode) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Appends a sort key
    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        self.sort.get_or_insert_with(Vec::new).push(spec);
        self
    }
}
