//! Record sorting
//!
//! Multi-key, stable and deterministic: records equal on every key keep
//! their incoming order.

use std::cmp::Ordering;

use serde_json::Value;

use super::value::compare_values;
use crate::path::resolve_field;
use crate::sort::{SortDirection, SortPlan};

/// Sorts records by a sort plan
pub struct RecordSorter;

impl RecordSorter {
    /// Sorts records in place according to the plan.
    ///
    /// `view` yields the JSON form each record is compared on.
    pub fn sort<T>(records: &mut [T], plan: &SortPlan, view: impl Fn(&T) -> &Value) {
        if plan.is_identity() {
            return;
        }
        records.sort_by(|a, b| Self::compare(view(a), view(b), plan));
    }

    /// Compares two records key by key; the first unequal key decides
    fn compare(a: &Value, b: &Value, plan: &SortPlan) -> Ordering {
        for key in plan.keys() {
            let ordering =
                compare_values(resolve_field(a, &key.field), resolve_field(b, &key.field));

            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
