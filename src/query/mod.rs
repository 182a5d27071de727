//! Question-to-query translation pipeline.
//!
//! This module provides:
//! - Promotion of raw entity mentions into concrete filters
//! - Keyword defaults for the model and missing filters
//! - Payload validation against the schema
//! - Capped, case-insensitive query execution

pub mod defaults;
pub mod executor;
pub mod promote;
pub mod types;
pub mod validate;

pub use defaults::apply_defaults;
pub use executor::{QueryExecutor, MAX_ROWS};
pub use promote::promote_entities;
pub use types::{
    is_no_results_row, no_results_row, EntityMentions, FilterSet, QueryPayload, RawSuggestion,
    ResultRow, NO_RESULTS_MESSAGE, NO_RESULTS_SUGGESTION, RELATION_SEPARATOR,
};
pub use validate::{flatten_filters, validate};
