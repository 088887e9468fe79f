//! Filter subsystem
//!
//! Compiles a nested filter tree into a parameterized boolean expression.
//!
//! # Components
//!
//! - `operator`: token table, the single source of operator semantics
//! - `flatten`: pre-order flattening that fixes parameter indices
//! - `compiler`: per-node validation and AST construction
//! - `ast`: structured predicate, rendered to text through `Display`
//!
//! # Example
//!
//! ```
//! use dynaquery::filter::{compile, FilterNode};
//!
//! let filter = FilterNode::new("age", "gte").with_value("18");
//! let compiled = compile(&filter).unwrap();
//!
//! assert_eq!(compiled.expression, "age >= @0");
//! assert_eq!(compiled.parameters, vec!["18"]);
//! ```

mod ast;
mod compiler;
mod flatten;
mod node;
mod operator;

pub use ast::{Condition, Group, PredicateExpr};
pub use compiler::{CompiledPredicate, FilterCompiler};
pub use flatten::{flatten, parameters};
pub use node::{FilterNode, Logic};
pub use operator::{Operator, OperatorClass};

use crate::config::QueryConfig;
use crate::errors::QueryResult;

/// Compiles a filter tree with the default configuration
pub fn compile(root: &FilterNode) -> QueryResult<CompiledPredicate> {
    FilterCompiler::new(&QueryConfig::default()).compile(root)
}
