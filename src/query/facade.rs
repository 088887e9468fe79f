//! # Dynamic Query Facade
//!
//! Single entry point: compiles a `DynamicQuery` and applies it to a
//! collection. Filtering runs before sorting; either step is skipped when its
//! input is absent.

use tracing::debug;

use super::request::DynamicQuery;
use super::target::QueryTarget;
use crate::config::QueryConfig;
use crate::errors::QueryResult;
use crate::filter::{CompiledPredicate, FilterCompiler};
use crate::sort::SortPlan;

/// Compiles and applies dynamic queries
#[derive(Debug, Clone, Default)]
pub struct DynamicQueryFacade {
    config: QueryConfig,
}

impl DynamicQueryFacade {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Compiles the query's filter, if any
    pub fn compile_filter(&self, query: &DynamicQuery) -> QueryResult<Option<CompiledPredicate>> {
        query
            .filter
            .as_ref()
            .map(|root| FilterCompiler::new(&self.config).compile(root))
            .transpose()
    }

    /// Builds the query's sort plan; absent or empty sort is the identity plan
    pub fn compile_sort(&self, query: &DynamicQuery) -> QueryResult<SortPlan> {
        match &query.sort {
            Some(specs) => SortPlan::build(specs, &self.config),
            None => Ok(SortPlan::default()),
        }
    }

    /// Filters, then sorts, `collection`.
    ///
    /// Both halves are compiled before the collection is touched, so an
    /// invalid sort never leaves a half-applied result behind.
    pub fn apply<C: QueryTarget>(&self, collection: C, query: &DynamicQuery) -> QueryResult<C> {
        let predicate = self.compile_filter(query)?;
        let plan = self.compile_sort(query)?;

        let collection = match predicate {
            Some(predicate) if !predicate.is_match_all() => collection.filter_by(&predicate)?,
            Some(_) => {
                debug!("Filter has no conditions, skipping");
                collection
            }
            None => collection,
        };

        if plan.is_identity() {
            return Ok(collection);
        }
        collection.order_by(&plan)
    }
}

/// Applies a query with the default configuration
pub fn apply<C: QueryTarget>(collection: C, query: &DynamicQuery) -> QueryResult<C> {
    DynamicQueryFacade::default().apply(collection, query)
}
