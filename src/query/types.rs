//! Types for the question-to-query translation pipeline.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Raw Suggestion
// ============================================================================

/// The collaborator's structural suggestion for one question.
///
/// Schema-shaped but semantically untrusted: every field is defaulted so a
/// partial tool call still parses, and filter values stay raw JSON so a
/// malformed shape survives to validation instead of failing opaquely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawSuggestion {
    /// Candidate model name; must still pass validation.
    pub model: Option<String>,
    /// Raw entity mentions grouped by category.
    pub entities: EntityMentions,
    /// Explicit filter suggestions, field name to raw value.
    pub filters: serde_json::Map<String, Value>,
}

impl RawSuggestion {
    /// Parse a suggestion out of untrusted tool-call arguments.
    ///
    /// A `filters` that is not a mapping is a shape violation; any other
    /// deserialization failure means the collaborator's arguments were
    /// malformed.
    pub fn from_value(mut value: Value) -> crate::error::Result<Self> {
        if let Some(obj) = value.as_object_mut() {
            match obj.get("filters") {
                Some(Value::Null) => {
                    obj.remove("filters");
                }
                Some(filters) if !filters.is_object() => {
                    return Err(crate::error::ShapeError::NotAMapping.into());
                }
                _ => {}
            }
        }
        serde_json::from_value(value)
            .map_err(|e| crate::error::ExtractionError::Malformed(e).into())
    }
}

/// Raw entity mentions, grouped by domain category. Order is the mention
/// order in the question; only the first mention per category is promoted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EntityMentions {
    pub brain_regions: Vec<String>,
    pub probe_types: Vec<String>,
    pub subject_states: Vec<String>,
}

impl EntityMentions {
    pub fn is_empty(&self) -> bool {
        self.brain_regions.is_empty()
            && self.probe_types.is_empty()
            && self.subject_states.is_empty()
    }
}

// ============================================================================
// Filters and Payload
// ============================================================================

/// Canonicalized filters, field name to canonical value. BTreeMap keeps
/// iteration deterministic for logging and tests.
pub type FilterSet = BTreeMap<String, String>;

/// Separator marking a one-hop relationship traversal in a field name
/// (e.g. `subject__state` filters Recording rows by the related Subject).
pub const RELATION_SEPARATOR: &str = "__";

/// A validated, executable query. Constructed only by the payload validator,
/// so holding one proves the model is known and the filters are flat strings
/// on known fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPayload {
    model: String,
    filters: FilterSet,
}

impl QueryPayload {
    pub(crate) fn new(model: String, filters: FilterSet) -> Self {
        Self { model, filters }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }
}

// ============================================================================
// Result Rows
// ============================================================================

/// One materialized row: column name to value.
pub type ResultRow = serde_json::Map<String, Value>;

/// Message carried by the no-results sentinel row.
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Suggestion carried by the no-results sentinel row.
pub const NO_RESULTS_SUGGESTION: &str = "Try a different search term or check spelling";

/// Build the sentinel row returned in place of an empty result set.
pub fn no_results_row() -> ResultRow {
    let mut row = ResultRow::new();
    row.insert("message".to_string(), Value::String(NO_RESULTS_MESSAGE.to_string()));
    row.insert(
        "suggestion".to_string(),
        Value::String(NO_RESULTS_SUGGESTION.to_string()),
    );
    row
}

/// Whether a row is the no-results sentinel rather than data.
pub fn is_no_results_row(row: &ResultRow) -> bool {
    row.get("message").and_then(Value::as_str) == Some(NO_RESULTS_MESSAGE)
}
