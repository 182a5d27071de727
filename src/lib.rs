//! Neuroquery: natural-language queries over a lab dataset.
//!
//! A question like "recordings from hippocampus while the animal was
//! sleeping" goes to an LLM collaborator for a structured suggestion, which
//! is then promoted, defaulted, validated against the schema, canonicalized,
//! and executed as a capped case-insensitive equality query.

pub mod assistant;
pub mod canonical;
pub mod config;
pub mod error;
pub mod extractor;
pub mod query;
pub mod schema;
pub mod store;

pub use assistant::{AskOutcome, QueryAssistant};
pub use canonical::Canonicalizer;
pub use config::Config;
pub use error::{
    ConfigError, ExtractionError, NeuroqueryError, Result, SchemaError, ShapeError, StoreError,
};
pub use extractor::{ApiExtractor, EntityExtractor, ScriptedExtractor};
pub use query::{
    is_no_results_row, no_results_row, EntityMentions, FilterSet, QueryExecutor, QueryPayload,
    RawSuggestion, ResultRow, MAX_ROWS,
};
pub use schema::Schema;
pub use store::{seed_demo_data, DataStore, FilterCond, MemoryStore};
