//! # Operator Table
//!
//! Maps filter-operator tokens to their predicate-language rendering.
//! This table is the only place operator tokens are interpreted.

use std::fmt;

use crate::errors::{QueryError, QueryResult};

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equals
    Eq,
    /// Not equals
    Neq,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Field is null or missing
    IsNull,
    /// Field is present and not null
    IsNotNull,
    /// String prefix match
    StartsWith,
    /// String suffix match
    EndsWith,
    /// Substring match
    Contains,
    /// Negated substring match
    DoesNotContain,
}

/// How an operator is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// `field <symbol> @i`
    Infix,
    /// `field <symbol>`, no placeholder
    Unary,
    /// `(field.Method(@i))`, possibly negated
    Call,
}

const OPERATOR_TABLE: [(&str, Operator); 12] = [
    ("eq", Operator::Eq),
    ("neq", Operator::Neq),
    ("lt", Operator::Lt),
    ("lte", Operator::Lte),
    ("gt", Operator::Gt),
    ("gte", Operator::Gte),
    ("isnull", Operator::IsNull),
    ("isnotnull", Operator::IsNotNull),
    ("startswith", Operator::StartsWith),
    ("endswith", Operator::EndsWith),
    ("contains", Operator::Contains),
    ("doesnotcontain", Operator::DoesNotContain),
];

impl Operator {
    /// Looks up an operator token (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidOperator` for an empty or unknown token.
    pub fn from_token(token: &str) -> QueryResult<Self> {
        OPERATOR_TABLE
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, op)| *op)
            .ok_or_else(|| QueryError::InvalidOperator(token.to_string()))
    }

    /// Returns the request token
    pub fn token(&self) -> &'static str {
        OPERATOR_TABLE
            .iter()
            .find(|(_, op)| op == self)
            .map(|(t, _)| *t)
            .unwrap_or_default()
    }

    pub fn class(&self) -> OperatorClass {
        match self {
            Operator::Eq
            | Operator::Neq
            | Operator::Lt
            | Operator::Lte
            | Operator::Gt
            | Operator::Gte => OperatorClass::Infix,
            Operator::IsNull | Operator::IsNotNull => OperatorClass::Unary,
            Operator::StartsWith
            | Operator::EndsWith
            | Operator::Contains
            | Operator::DoesNotContain => OperatorClass::Call,
        }
    }

    /// Rendered form: the infix/unary symbol, or the method name for calls
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::IsNull => "== null",
            Operator::IsNotNull => "!= null",
            Operator::StartsWith => "StartsWith",
            Operator::EndsWith => "EndsWith",
            Operator::Contains | Operator::DoesNotContain => "Contains",
        }
    }

    /// Whether the rendered call is negated
    pub fn is_negated(&self) -> bool {
        matches!(self, Operator::DoesNotContain)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
