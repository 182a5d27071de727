//! In-memory data store with one-hop relationship traversal.
//!
//! Rows are plain column-value maps. A row referencing a related model
//! carries a `<relation>_id` column pointing at the related row's `id`, and
//! a `relation__field` condition resolves through it.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::query::{ResultRow, RELATION_SEPARATOR};

use super::traits::{DataStore, FilterCond};

/// In-memory tables keyed by model name.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<ResultRow>>>,
    /// (model, relation name) -> related model name.
    relations: RwLock<HashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table for a model, replacing any existing rows.
    pub async fn insert_table(&self, model: impl Into<String>, rows: Vec<ResultRow>) {
        self.tables.write().await.insert(model.into(), rows);
    }

    /// Append one row to a model's table.
    pub async fn insert_row(&self, model: &str, row: ResultRow) {
        self.tables
            .write()
            .await
            .entry(model.to_string())
            .or_default()
            .push(row);
    }

    /// Declare that `model.relation` points at `target` rows via
    /// a `<relation>_id` column.
    pub async fn register_relation(&self, model: &str, relation: &str, target: &str) {
        self.relations.write().await.insert(
            (model.to_string(), relation.to_string()),
            target.to_string(),
        );
    }

    fn row_matches(
        row: &ResultRow,
        cond: &FilterCond,
        model: &str,
        tables: &HashMap<String, Vec<ResultRow>>,
        relations: &HashMap<(String, String), String>,
    ) -> Result<bool> {
        match cond.path.split_once(RELATION_SEPARATOR) {
            None => Ok(value_matches(row.get(&cond.path), cond)),
            Some((relation, field)) => {
                let target_model = relations
                    .get(&(model.to_string(), relation.to_string()))
                    .ok_or_else(|| {
                        StoreError::Query(format!("unknown relation {model}.{relation}"))
                    })?;
                let target_rows = tables.get(target_model).ok_or_else(|| {
                    StoreError::UnknownTable(target_model.clone())
                })?;

                let fk_column = format!("{relation}_id");
                let Some(fk) = row.get(&fk_column) else {
                    return Ok(false);
                };
                let related = target_rows.iter().find(|r| r.get("id") == Some(fk));
                Ok(related.is_some_and(|r| value_matches(r.get(field), cond)))
            }
        }
    }

    async fn scan(
        &self,
        model: &str,
        conds: &[FilterCond],
        limit: usize,
    ) -> Result<Vec<ResultRow>> {
        let tables = self.tables.read().await;
        let relations = self.relations.read().await;
        let rows = tables
            .get(model)
            .ok_or_else(|| StoreError::UnknownTable(model.to_string()))?;

        let mut matched = Vec::new();
        for row in rows {
            let mut all = true;
            for cond in conds {
                if !Self::row_matches(row, cond, model, &tables, &relations)? {
                    all = false;
                    break;
                }
            }
            if all {
                matched.push(row.clone());
                if matched.len() >= limit {
                    break;
                }
            }
        }
        Ok(matched)
    }
}

fn value_matches(actual: Option<&Value>, cond: &FilterCond) -> bool {
    match actual {
        Some(Value::String(s)) => {
            if cond.case_insensitive {
                s.eq_ignore_ascii_case(&cond.value)
            } else {
                s == &cond.value
            }
        }
        Some(other) => other.to_string() == cond.value,
        None => false,
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn fetch(
        &self,
        model: &str,
        conds: &[FilterCond],
        limit: usize,
    ) -> Result<Vec<ResultRow>> {
        self.scan(model, conds, limit).await
    }

    async fn exists(&self, model: &str, conds: &[FilterCond]) -> Result<bool> {
        Ok(!self.scan(model, conds, 1).await?.is_empty())
    }
}

/// Seed the demo lab dataset: a few subjects and their recordings.
pub async fn seed_demo_data(store: &MemoryStore) {
    let subjects = vec![
        row(&[("id", "1"), ("name", "mouse-01"), ("state", "awake")]),
        row(&[("id", "2"), ("name", "mouse-02"), ("state", "REM")]),
        row(&[("id", "3"), ("name", "rat-07"), ("state", "NREM")]),
    ];
    let recordings = vec![
        row(&[
            ("id", "1"),
            ("subject_id", "1"),
            ("brain_region", "V1"),
            ("probe_type", "Neuropixels"),
        ]),
        row(&[
            ("id", "2"),
            ("subject_id", "2"),
            ("brain_region", "Hippocampus"),
            ("probe_type", "Tetrode"),
        ]),
        row(&[
            ("id", "3"),
            ("subject_id", "2"),
            ("brain_region", "Hippocampus"),
            ("probe_type", "Neuropixels"),
        ]),
        row(&[
            ("id", "4"),
            ("subject_id", "3"),
            ("brain_region", "V1"),
            ("probe_type", "Tetrode"),
        ]),
    ];

    store.insert_table("Subject", subjects).await;
    store.insert_table("Recording", recordings).await;
    store.register_relation("Recording", "subject", "Subject").await;
}

/// Build a row from string columns.
pub fn row(columns: &[(&str, &str)]) -> ResultRow {
    columns
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        seed_demo_data(&store).await;
        store
    }

    #[tokio::test]
    async fn test_direct_field_match_is_case_insensitive() {
        let store = seeded().await;
        let rows = store
            .fetch(
                "Recording",
                &[FilterCond::new("brain_region", "hippocampus")],
                20,
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_relationship_hop() {
        let store = seeded().await;
        let rows = store
            .fetch("Recording", &[FilterCond::new("subject__state", "REM")], 20)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        for r in &rows {
            assert_eq!(r.get("subject_id").and_then(Value::as_str), Some("2"));
        }
    }

    #[tokio::test]
    async fn test_unknown_relation_is_an_error() {
        let store = seeded().await;
        let result = store
            .fetch("Recording", &[FilterCond::new("session__state", "REM")], 20)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_table_is_an_error() {
        let store = seeded().await;
        let result = store.fetch("Session", &[], 20).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_limit_applied() {
        let store = seeded().await;
        let rows = store.fetch("Recording", &[], 3).await.unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_exists() {
        let store = seeded().await;
        assert!(store
            .exists("Subject", &[FilterCond::new("state", "rem")])
            .await
            .unwrap());
        assert!(!store
            .exists("Subject", &[FilterCond::new("state", "hibernating")])
            .await
            .unwrap());
    }
}
