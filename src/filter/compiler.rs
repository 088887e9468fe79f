//! # Filter Compiler
//!
//! Turns a filter tree into a `CompiledPredicate`: a boolean expression with
//! positional placeholders plus the parameter list bound to them.
//!
//! # Compilation (strict order)
//!
//! 1. Check tree depth and size against `QueryConfig`
//! 2. Flatten the tree once; its pre-order fixes every parameter index
//! 3. Validate and compile each node as it is visited, parent first
//! 4. Render the AST and extract the parameter list
//!
//! The first invalid node aborts compilation; no partial expression escapes.

use tracing::{debug, warn};

use super::ast::{Condition, Group, PredicateExpr};
use super::flatten::{flatten, parameters};
use super::node::{FilterNode, Logic};
use super::operator::{Operator, OperatorClass};
use crate::config::QueryConfig;
use crate::errors::{QueryError, QueryResult};
use crate::path::FieldPath;

/// Result of compiling a filter tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPredicate {
    /// Rendered expression using `@0`, `@1`, ... placeholders
    pub expression: String,
    /// `parameters[i]` binds placeholder `@i`
    pub parameters: Vec<String>,
    /// Structured form the expression was rendered from
    pub ast: PredicateExpr,
}

impl CompiledPredicate {
    /// True when the tree produced no condition at all
    pub fn is_match_all(&self) -> bool {
        self.ast.is_empty()
    }
}

/// Compiles filter trees under a configuration
pub struct FilterCompiler<'a> {
    config: &'a QueryConfig,
}

impl<'a> FilterCompiler<'a> {
    pub fn new(config: &'a QueryConfig) -> Self {
        Self { config }
    }

    /// Compiles a filter tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// `InvalidField`, `InvalidOperator` or `InvalidLogic` for the first
    /// offending node in pre-order; `FilterTooDeep` / `TooManyNodes` when the
    /// tree exceeds the configured limits.
    pub fn compile(&self, root: &FilterNode) -> QueryResult<CompiledPredicate> {
        self.compile_tree(root).inspect_err(|e| {
            warn!(code = e.code(), error = %e, "Filter rejected");
        })
    }

    fn compile_tree(&self, root: &FilterNode) -> QueryResult<CompiledPredicate> {
        if root.depth() > self.config.max_depth {
            return Err(QueryError::FilterTooDeep(self.config.max_depth));
        }

        let flattened = flatten(root);
        if flattened.len() > self.config.max_nodes {
            return Err(QueryError::TooManyNodes(
                flattened.len(),
                self.config.max_nodes,
            ));
        }

        let mut cursor = 0;
        let ast = self.compile_node(root, &flattened, &mut cursor)?;
        debug_assert_eq!(cursor, flattened.len());

        let compiled = CompiledPredicate {
            expression: ast.to_string(),
            parameters: parameters(&flattened),
            ast,
        };

        debug!(
            expression = %compiled.expression,
            parameters = compiled.parameters.len(),
            "Compiled filter"
        );

        Ok(compiled)
    }

    /// Compiles one node and its subtree.
    ///
    /// `cursor` walks the flattened list in step with the recursion, so the
    /// index taken here is this node's pre-order position.
    fn compile_node(
        &self,
        node: &FilterNode,
        flattened: &[&FilterNode],
        cursor: &mut usize,
    ) -> QueryResult<PredicateExpr> {
        let index = *cursor;
        *cursor += 1;
        debug_assert!(std::ptr::eq(flattened[index], node));

        let condition = if is_pure_group(node) {
            None
        } else {
            let op = self.validate_condition(node)?;
            own_condition(node, op, index)
        };

        if node.children.is_empty() {
            return Ok(PredicateExpr::leaf(condition));
        }

        let logic = node
            .logic
            .as_deref()
            .ok_or_else(|| QueryError::InvalidLogic(String::new()))
            .and_then(Logic::from_token)?;

        let children = node
            .children
            .iter()
            .map(|child| self.compile_node(child, flattened, cursor))
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(PredicateExpr {
            condition,
            group: Some(Group { logic, children }),
        })
    }

    fn validate_condition(&self, node: &FilterNode) -> QueryResult<Operator> {
        if node.field.is_empty() {
            return Err(QueryError::InvalidField(String::new()));
        }
        if self.config.strict_field_paths {
            FieldPath::parse(&node.field)?;
        }
        Operator::from_token(&node.operator)
    }
}

/// A node that only carries a connective and children
fn is_pure_group(node: &FilterNode) -> bool {
    !node.children.is_empty()
        && node.field.is_empty()
        && node.operator.is_empty()
        && !node.has_value()
}

fn own_condition(node: &FilterNode, op: Operator, index: usize) -> Option<Condition> {
    let field = node.field.clone();

    match op.class() {
        OperatorClass::Unary => Some(Condition::Null {
            field,
            negated: op == Operator::IsNotNull,
        }),
        _ if !node.has_value() => None,
        OperatorClass::Call => Some(Condition::Match {
            field,
            method: op,
            param: index,
        }),
        OperatorClass::Infix => Some(Condition::Compare {
            field,
            op,
            param: index,
        }),
    }
}
