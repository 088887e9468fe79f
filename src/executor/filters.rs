//! Predicate filtering for in-memory records
//!
//! Evaluates a compiled predicate's AST against the JSON view of a record,
//! binding placeholders from the parameter list by index.
//! Field access is null-tolerant: an unresolvable path never raises, it just
//! fails the condition.

use std::cmp::Ordering;

use serde_json::Value;

use super::value::compare_with_param;
use crate::filter::{CompiledPredicate, Condition, Logic, Operator, PredicateExpr};
use crate::path::resolve_field;

/// Evaluates compiled predicates against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches a compiled predicate.
    ///
    /// Grouping follows the rendered expression: only a node's children are
    /// parenthesized, so a child that has children of its own splices
    /// `own {logic} (...)` into its parent's list, and `and` binds tighter
    /// than `or` across it. A predicate without any condition matches every
    /// record.
    pub fn matches(record: &Value, predicate: &CompiledPredicate) -> bool {
        let mut clauses = Clauses::default();
        Self::splice(record, &predicate.ast, &predicate.parameters, &mut clauses);
        clauses.evaluate().unwrap_or(true)
    }

    /// Appends a node's rendered operands to the enclosing sequence
    fn splice(record: &Value, expr: &PredicateExpr, params: &[String], out: &mut Clauses) {
        out.push(
            expr.condition
                .as_ref()
                .map(|condition| Self::matches_condition(record, condition, params)),
        );

        let Some(group) = &expr.group else {
            return;
        };

        let mut inner = Clauses::default();
        for (i, child) in group.children.iter().enumerate() {
            if i > 0 {
                inner.join(group.logic);
            }
            Self::splice(record, child, params, &mut inner);
        }

        out.join(group.logic);
        out.push(inner.evaluate());
    }

    /// Checks a single condition
    fn matches_condition(record: &Value, condition: &Condition, params: &[String]) -> bool {
        match condition {
            Condition::Null { field, negated } => {
                let is_null = resolve_field(record, field).map_or(true, Value::is_null);
                is_null != *negated
            }
            Condition::Compare { field, op, param } => {
                let (Some(actual), Some(raw)) = (resolve_field(record, field), params.get(*param))
                else {
                    return false; // Missing field = no match
                };
                Self::compare_match(actual, *op, raw)
            }
            Condition::Match {
                field,
                method,
                param,
            } => {
                let (Some(Value::String(actual)), Some(raw)) =
                    (resolve_field(record, field), params.get(*param))
                else {
                    return false;
                };
                let hit = match method {
                    Operator::StartsWith => actual.starts_with(raw.as_str()),
                    Operator::EndsWith => actual.ends_with(raw.as_str()),
                    _ => actual.contains(raw.as_str()),
                };
                hit != method.is_negated()
            }
        }
    }

    /// Infix comparison with the parameter coerced to the field's type
    fn compare_match(actual: &Value, op: Operator, raw: &str) -> bool {
        // Null only differs from things
        if actual.is_null() {
            return op == Operator::Neq;
        }

        let Some(ordering) = compare_with_param(actual, raw) else {
            return false;
        };

        match op {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Neq => ordering != Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            _ => false,
        }
    }
}

/// Operands of one parenthesized level, split at each `or`.
///
/// Empty operands (`None`) drop out together with their connective.
struct Clauses {
    clauses: Vec<Vec<Option<bool>>>,
}

impl Default for Clauses {
    fn default() -> Self {
        Self {
            clauses: vec![Vec::new()],
        }
    }
}

impl Clauses {
    fn push(&mut self, operand: Option<bool>) {
        if let Some(clause) = self.clauses.last_mut() {
            clause.push(operand);
        }
    }

    fn join(&mut self, logic: Logic) {
        if logic == Logic::Or {
            self.clauses.push(Vec::new());
        }
    }

    /// `or` over the `and` of each clause; `None` when nothing is present
    fn evaluate(&self) -> Option<bool> {
        self.clauses
            .iter()
            .filter_map(|clause| {
                clause
                    .iter()
                    .flatten()
                    .copied()
                    .reduce(|a, b| a && b)
            })
            .reduce(|a, b| a || b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{compile, FilterNode};
    use serde_json::json;

    fn matches(record: &Value, filter: &FilterNode) -> bool {
        PredicateFilter::matches(record, &compile(filter).unwrap())
    }

    fn leaf(field: &str, op: &str, value: &str) -> FilterNode {
        FilterNode::new(field, op).with_value(value)
    }

    #[test]
    fn test_range_predicates() {
        let record = json!({"age": 25});

        assert!(matches(&record, &leaf("age", "gte", "18")));
        assert!(matches(&record, &leaf("age", "lte", "25")));
        assert!(!matches(&record, &leaf("age", "gt", "25")));
        assert!(!matches(&record, &leaf("age", "lt", "25")));
        assert!(matches(&record, &leaf("age", "neq", "30")));
    }

    #[test]
    fn test_uncoercible_parameter_no_match() {
        let record = json!({"age": 25});
        assert!(!matches(&record, &leaf("age", "eq", "twenty")));
        assert!(!matches(&record, &leaf("age", "neq", "twenty")));
    }

    #[test]
    fn test_string_methods() {
        let record = json!({"name": "Johnson"});

        assert!(matches(&record, &leaf("name", "startswith", "John")));
        assert!(matches(&record, &leaf("name", "endswith", "son")));
        assert!(matches(&record, &leaf("name", "contains", "hns")));
        assert!(!matches(&record, &leaf("name", "contains", "john")));
        assert!(matches(&record, &leaf("name", "doesnotcontain", "x")));
        assert!(!matches(&record, &leaf("name", "doesnotcontain", "son")));
    }

    #[test]
    fn test_string_methods_need_strings() {
        let record = json!({"code": 1234});
        assert!(!matches(&record, &leaf("code", "contains", "23")));
        assert!(!matches(&record, &leaf("code", "doesnotcontain", "9")));
        assert!(!matches(&record, &leaf("missing", "doesnotcontain", "9")));
    }

    #[test]
    fn test_null_checks() {
        let record = json!({"email": null, "name": "Ann"});

        assert!(matches(&record, &FilterNode::new("email", "isnull")));
        assert!(matches(&record, &FilterNode::new("phone", "isnull")));
        assert!(!matches(&record, &FilterNode::new("name", "isnull")));
        assert!(matches(&record, &FilterNode::new("name", "isnotnull")));
        assert!(!matches(&record, &FilterNode::new("phone", "isnotnull")));
    }

    #[test]
    fn test_null_field_comparisons() {
        let record = json!({"email": null});
        assert!(!matches(&record, &leaf("email", "eq", "a@b.c")));
        assert!(matches(&record, &leaf("email", "neq", "a@b.c")));
    }

    #[test]
    fn test_missing_field_no_match() {
        let record = json!({"name": "Alice"});
        assert!(!matches(&record, &leaf("age", "eq", "30")));
        assert!(!matches(&record, &leaf("address.city", "eq", "Oslo")));
    }

    #[test]
    fn test_nested_paths() {
        let record = json!({"address": {"city": "Oslo"}, "tags": ["vip", "new"]});
        assert!(matches(&record, &leaf("address.city", "eq", "Oslo")));
        assert!(matches(&record, &leaf("tags[1]", "eq", "new")));
    }

    #[test]
    fn test_and_or_groups() {
        let adult_or_senior = FilterNode::default()
            .with_logic("or")
            .with_child(leaf("age", "lt", "13"))
            .with_child(leaf("age", "gt", "65"));

        assert!(matches(&json!({"age": 10}), &adult_or_senior));
        assert!(matches(&json!({"age": 70}), &adult_or_senior));
        assert!(!matches(&json!({"age": 30}), &adult_or_senior));

        let active_and_named = leaf("status", "eq", "active")
            .with_logic("and")
            .with_child(leaf("name", "startswith", "A"));

        assert!(matches(&json!({"status": "active", "name": "Ann"}), &active_and_named));
        assert!(!matches(&json!({"status": "active", "name": "Bob"}), &active_and_named));
        assert!(!matches(&json!({"status": "idle", "name": "Ann"}), &active_and_named));
    }

    #[test]
    fn test_nested_group_follows_rendered_precedence() {
        // a = @0 and (b = @1 or (c = @2) and d = @3)
        let filter = leaf("a", "eq", "1").with_logic("and").with_child(
            leaf("b", "eq", "1")
                .with_logic("or")
                .with_child(leaf("c", "eq", "1")),
        );
        let filter = filter.with_child(leaf("d", "eq", "1"));

        assert_eq!(
            compile(&filter).unwrap().expression,
            "a = @0 and (b = @1 or (c = @2) and d = @3)"
        );

        // a and (b or (c and d))
        assert!(matches(&json!({"a": 1, "b": 1, "c": 0, "d": 0}), &filter));
        assert!(matches(&json!({"a": 1, "b": 0, "c": 1, "d": 1}), &filter));
        assert!(!matches(&json!({"a": 1, "b": 0, "c": 1, "d": 0}), &filter));
        assert!(!matches(&json!({"a": 0, "b": 1, "c": 1, "d": 1}), &filter));
    }

    #[test]
    fn test_or_sibling_after_and_group() {
        // x = @1 and (y = @2) or z = @3
        let filter = FilterNode::group(
            "or",
            vec![
                leaf("x", "eq", "1")
                    .with_logic("and")
                    .with_child(leaf("y", "eq", "1")),
                leaf("z", "eq", "1"),
            ],
        );

        assert!(matches(&json!({"x": 1, "y": 1, "z": 0}), &filter));
        assert!(matches(&json!({"x": 0, "y": 0, "z": 1}), &filter));
        assert!(!matches(&json!({"x": 1, "y": 0, "z": 0}), &filter));
    }

    #[test]
    fn test_empty_conditions_are_skipped() {
        // Empty-valued leaves contribute nothing
        let filter = FilterNode::default()
            .with_logic("and")
            .with_child(FilterNode::new("age", "gte"))
            .with_child(leaf("name", "eq", "Ann"));

        assert!(matches(&json!({"name": "Ann"}), &filter));
        assert!(!matches(&json!({"name": "Bob"}), &filter));
        assert!(matches(&json!({}), &FilterNode::new("age", "gte")));
    }
}
