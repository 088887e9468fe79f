//! In-memory evaluator
//!
//! Applies compiled predicates and sort plans to `Vec<T>` collections.
//!
//! # Execution Flow (strict order)
//!
//! 1. View each record as JSON
//! 2. Filter records by the predicate AST, binding parameters by index
//! 3. Sort the survivors by the plan's keys (stable)
//! 4. Return the original records
//!
//! Field access is null-tolerant throughout: a path that does not resolve
//! fails the condition, or sorts first, and never raises.

mod collection;
mod filters;
mod sorter;
mod value;

pub use filters::PredicateFilter;
pub use sorter::RecordSorter;
