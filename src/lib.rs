//! dynaquery - Deterministic, injection-safe filter/sort compilation
//!
//! Compiles a nested filter tree into a boolean expression with positional
//! placeholders (`@0`, `@1`, ...) plus an index-aligned parameter list, and a
//! sort request into an ordering clause. Ships an in-memory evaluator for
//! `Vec<T: Serialize>`; other engines plug in through `QueryTarget`.

pub mod config;
pub mod errors;
pub mod executor;
pub mod filter;
pub mod path;
pub mod query;
pub mod sort;

pub use config::QueryConfig;
pub use errors::{QueryError, QueryResult};
pub use filter::{CompiledPredicate, FilterNode};
pub use query::{apply, DynamicQuery, DynamicQueryFacade, QueryTarget};
pub use sort::{SortPlan, SortSpec};
