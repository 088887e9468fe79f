//! # Query Errors
//!
//! Error types for filter/sort compilation and evaluation.
//!
//! Every variant except `Config` and `Record` is a caller-input validation
//! failure. They are reported synchronously, abort the whole compilation and
//! are never retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query compilation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    // ==================
    // Input validation
    // ==================
    /// Filter or sort node with an empty or malformed field
    #[error("Invalid field: {0:?}")]
    InvalidField(String),

    /// Empty or unrecognized filter operator
    #[error("Invalid operator: {0:?}")]
    InvalidOperator(String),

    /// Node with children but no (or an unrecognized) logical connective
    #[error("Invalid logic: {0:?}")]
    InvalidLogic(String),

    /// Sort direction other than `asc` / `desc`
    #[error("Invalid sort direction: {0:?}")]
    InvalidSortDirection(String),

    /// Request body is not a valid query
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Filter nesting deeper than the configured maximum
    #[error("Filter nesting exceeds maximum depth {0}")]
    FilterTooDeep(usize),

    /// Filter tree larger than the configured maximum
    #[error("Filter has {0} nodes, maximum is {1}")]
    TooManyNodes(usize, usize),

    /// More sort keys than the configured maximum
    #[error("Sort has {0} keys, maximum is {1}")]
    TooManySortKeys(usize, usize),

    // ==================
    // Environment
    // ==================
    /// Configuration could not be read or is out of range
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A record could not be viewed as JSON for evaluation
    #[error("Record conversion failed: {0}")]
    Record(String),
}

impl QueryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidField(_) => "QUERY_INVALID_FIELD",
            QueryError::InvalidOperator(_) => "QUERY_INVALID_OPERATOR",
            QueryError::InvalidLogic(_) => "QUERY_INVALID_LOGIC",
            QueryError::InvalidSortDirection(_) => "QUERY_INVALID_SORT_DIRECTION",
            QueryError::InvalidRequest(_) => "QUERY_INVALID_REQUEST",
            QueryError::FilterTooDeep(_) => "QUERY_FILTER_TOO_DEEP",
            QueryError::TooManyNodes(_, _) => "QUERY_TOO_MANY_NODES",
            QueryError::TooManySortKeys(_, _) => "QUERY_TOO_MANY_SORT_KEYS",
            QueryError::Config(_) => "QUERY_CONFIG",
            QueryError::Record(_) => "QUERY_RECORD",
        }
    }

    /// Whether the error was caused by the request itself
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryError::Config(_) | QueryError::Record(_))
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl From<&QueryError> for ErrorResponse {
    fn from(err: &QueryError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
            status: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
