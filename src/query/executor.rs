//! Query Executor.
//!
//! Turns a validated payload into case-insensitive equality conditions,
//! runs them against the data store, and applies the row cap and the
//! empty-result policy.

use std::sync::Arc;

use crate::canonical::Canonicalizer;
use crate::error::Result;
use crate::store::{DataStore, FilterCond};

use super::types::{no_results_row, QueryPayload, ResultRow};

/// Hard cap on materialized rows. No pagination; a query is single-shot.
pub const MAX_ROWS: usize = 20;

/// Executes validated payloads against the data store. Read-only; nothing is
/// cached between calls.
pub struct QueryExecutor {
    canonicalizer: Canonicalizer,
    store: Arc<dyn DataStore>,
}

impl QueryExecutor {
    pub fn new(canonicalizer: Canonicalizer, store: Arc<dyn DataStore>) -> Self {
        Self {
            canonicalizer,
            store,
        }
    }

    /// Execute a payload, returning at most [`MAX_ROWS`] rows.
    ///
    /// Filter values are canonicalized again here; the pass is idempotent
    /// and covers values that reached the payload as explicit filters.
    /// Zero matches yields the one-element sentinel collection, never an
    /// empty one.
    pub async fn execute(&self, payload: &QueryPayload) -> Result<Vec<ResultRow>> {
        let conds: Vec<FilterCond> = payload
            .filters()
            .iter()
            .map(|(field, value)| {
                FilterCond::new(field.clone(), self.canonicalizer.canonicalize(value))
            })
            .collect();

        tracing::debug!(model = payload.model(), conditions = conds.len(), "executing query");

        let rows = self.store.fetch(payload.model(), &conds, MAX_ROWS).await?;
        tracing::info!(model = payload.model(), rows = rows.len(), "query executed");

        if rows.is_empty() {
            return Ok(vec![no_results_row()]);
        }
        Ok(rows)
    }
}
