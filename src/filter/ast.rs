//! Predicate AST
//!
//! Structured form of a compiled filter. The compiler builds this tree and
//! renders it through `Display`; in-process evaluators walk it directly.

use std::fmt;

use super::node::Logic;
use super::operator::Operator;

/// A single leaf condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Infix comparison: `field >= @3`
    Compare {
        field: String,
        op: Operator,
        param: usize,
    },
    /// Null test: `field == null` / `field != null`
    Null { field: String, negated: bool },
    /// String method call: `(field.StartsWith(@1))`, `(!field.Contains(@2))`
    Match {
        field: String,
        method: Operator,
        param: usize,
    },
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { field, op, param } => {
                write!(f, "{} {} @{}", field, op.symbol(), param)
            }
            Condition::Null { field, negated } => {
                let symbol = if *negated {
                    Operator::IsNotNull.symbol()
                } else {
                    Operator::IsNull.symbol()
                };
                write!(f, "{} {}", field, symbol)
            }
            Condition::Match {
                field,
                method,
                param,
            } => {
                let bang = if method.is_negated() { "!" } else { "" };
                write!(f, "({}{}.{}(@{}))", bang, field, method.symbol(), param)
            }
        }
    }
}

/// Children combined under one connective
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub logic: Logic,
    pub children: Vec<PredicateExpr>,
}

/// Compiled form of one filter node and its subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateExpr {
    /// The node's own condition; `None` when the node carries no usable value
    pub condition: Option<Condition>,
    /// The node's children, if it has any
    pub group: Option<Group>,
}

impl PredicateExpr {
    pub fn leaf(condition: Option<Condition>) -> Self {
        Self {
            condition,
            group: None,
        }
    }

    /// True when neither this node nor any descendant produced a condition
    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
            && self
                .group
                .as_ref()
                .map_or(true, |g| g.children.iter().all(PredicateExpr::is_empty))
    }
}

/// Renders `{own} {logic} ({child} {logic} {child} ...)`.
///
/// An empty own condition still leaves the leading connective in place.
impl fmt::Display for PredicateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(condition) = &self.condition {
            write!(f, "{}", condition)?;
        }

        if let Some(group) = &self.group {
            write!(f, " {} (", group.logic)?;
            for (i, child) in group.children.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", group.logic)?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}
