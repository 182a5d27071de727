//! Canonicalizer: collapse informal mentions to canonical domain values.
//!
//! The alias table from the schema wins over the built-in equivalence rules,
//! and anything outside the closed vocabulary passes through untouched so no
//! information is lost for values the schema does not know about.

use std::sync::Arc;

use crate::schema::Schema;

/// Built-in equivalence rules, applied in priority order after the alias
/// table. Each rule maps a set of lowercase spellings to one canonical value.
const EQUIVALENCE_RULES: &[(&[&str], &str)] = &[
    (&["v1", "v-1", "visual cortex"], "V1"),
    (&["hippocampus", "hippo", "hpc"], "Hippocampus"),
    (&["neuropixel", "neuropixels", "npx"], "Neuropixels"),
    (&["tetrode", "tetrodes"], "Tetrode"),
    (&["rem", "rem sleep"], "REM"),
    (&["nrem"], "NREM"),
    (&["awake", "wake"], "awake"),
];

/// Normalizes raw string values against the schema's vocabulary.
///
/// Pure and deterministic; `canonicalize` is idempotent because every
/// canonical value maps back to itself.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    schema: Arc<Schema>,
}

impl Canonicalizer {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    /// Resolve a raw value to its canonical form.
    ///
    /// Empty input and values outside the vocabulary are returned unchanged.
    pub fn canonicalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return raw.to_string();
        }

        let lowered = raw.to_lowercase();

        // Exact alias match wins over the heuristic rules.
        if let Some(canonical) = self.schema.alias_lookup(&lowered) {
            return canonical.to_string();
        }

        for (spellings, canonical) in EQUIVALENCE_RULES {
            if spellings.contains(&lowered.as_str()) {
                return (*canonical).to_string();
            }
        }

        raw.to_string()
    }
}
