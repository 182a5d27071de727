//! Data store trait: the persistence collaborator boundary.

use async_trait::async_trait;

use crate::error::Result;
use crate::query::ResultRow;

/// One equality condition against a field or one-hop relationship path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCond {
    /// Field name, or `relation__field` for a one-hop traversal.
    pub path: String,
    /// Expected value.
    pub value: String,
    /// Compare ignoring ASCII case.
    pub case_insensitive: bool,
}

impl FilterCond {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            case_insensitive: true,
        }
    }
}

/// Read-only access to the dataset, one model at a time.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Materialize up to `limit` rows of `model` matching every condition.
    async fn fetch(
        &self,
        model: &str,
        conds: &[FilterCond],
        limit: usize,
    ) -> Result<Vec<ResultRow>>;

    /// Whether any row of `model` matches, without materializing rows.
    async fn exists(&self, model: &str, conds: &[FilterCond]) -> Result<bool>;
}
