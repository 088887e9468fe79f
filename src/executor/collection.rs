//! In-memory collections
//!
//! `Vec<T>` of any serializable record type is a `QueryTarget`. Records are
//! viewed through serde_json for evaluation and returned untouched.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::filters::PredicateFilter;
use super::sorter::RecordSorter;
use crate::errors::{QueryError, QueryResult};
use crate::filter::CompiledPredicate;
use crate::query::QueryTarget;
use crate::sort::SortPlan;

impl<T: Serialize> QueryTarget for Vec<T> {
    fn filter_by(self, predicate: &CompiledPredicate) -> QueryResult<Self> {
        let before = self.len();
        let mut kept = Vec::with_capacity(before);

        for record in self {
            if PredicateFilter::matches(&to_view(&record)?, predicate) {
                kept.push(record);
            }
        }

        debug!(before, after = kept.len(), "Filtered records");
        Ok(kept)
    }

    fn order_by(self, plan: &SortPlan) -> QueryResult<Self> {
        if plan.is_identity() {
            return Ok(self);
        }

        let mut keyed = self
            .into_iter()
            .map(|record| Ok((to_view(&record)?, record)))
            .collect::<QueryResult<Vec<_>>>()?;

        RecordSorter::sort(&mut keyed, plan, |(view, _)| view);

        debug!(records = keyed.len(), ordering = %plan, "Sorted records");
        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }
}

fn to_view<T: Serialize>(record: &T) -> QueryResult<Value> {
    serde_json::to_value(record).map_err(|e| QueryError::Record(e.to_string()))
}
