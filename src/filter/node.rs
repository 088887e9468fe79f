//! # Filter Nodes
//!
//! The caller-facing filter tree, as it arrives in a request body.
//! Tokens are kept raw here and validated when the tree is compiled.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, QueryResult};

/// Logical connective between a node's condition and its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    /// Parses a logic token (case-sensitive)
    pub fn from_token(token: &str) -> QueryResult<Self> {
        match token {
            "and" => Ok(Logic::And),
            "or" => Ok(Logic::Or),
            _ => Err(QueryError::InvalidLogic(token.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "and",
            Logic::Or => "or",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One node of a filter tree: a leaf condition, a group of children under a
/// logical connective, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterNode {
    /// Field path the condition applies to
    #[serde(default)]
    pub field: String,

    /// Operator token (`eq`, `contains`, ...)
    #[serde(default)]
    pub operator: String,

    /// Raw comparison value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// `and` / `or`, required when `children` is non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<String>,

    /// Nested filters
    #[serde(default, alias = "filters", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FilterNode>,
}

impl FilterNode {
    /// Create a leaf condition
    pub fn new(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            ..Default::default()
        }
    }

    /// Create a grouping node that carries a connective and children but no
    /// value of its own
    pub fn group(logic: impl Into<String>, children: Vec<FilterNode>) -> Self {
        Self {
            logic: Some(logic.into()),
            children,
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_logic(mut self, logic: impl Into<String>) -> Self {
        self.logic = Some(logic.into());
        self
    }

    pub fn with_child(mut self, child: FilterNode) -> Self {
        self.children.push(child);
        self
    }

    /// Value as bound to this node's parameter slot; absent becomes empty
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn has_value(&self) -> bool {
        !self.value_str().is_empty()
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FilterNode::node_count).sum::<usize>()
    }

    /// Nesting depth of this subtree, a lone node has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(FilterNode::depth)
            .max()
            .unwrap_or(0)
    }
}
