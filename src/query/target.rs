//! Collection seam
//!
//! Anything that can evaluate a compiled predicate and an ordering plan.

use crate::errors::QueryResult;
use crate::filter::CompiledPredicate;
use crate::sort::SortPlan;

/// A collection the facade can filter and order.
///
/// Query-backed implementations bind `predicate.expression` with
/// `predicate.parameters` (`@i` → `parameters[i]`) and the rendered
/// `plan.to_string()` ordering clause. Unresolvable fields must count as
/// "no match", never as an error.
pub trait QueryTarget: Sized {
    /// Keeps the records matching `predicate`
    fn filter_by(self, predicate: &CompiledPredicate) -> QueryResult<Self>;

    /// Orders the records by `plan`
    fn order_by(self, plan: &SortPlan) -> QueryResult<Self>;
}
