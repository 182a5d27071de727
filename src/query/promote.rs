//! Entity-to-filter promotion.
//!
//! Turns the collaborator's raw entity mentions into concrete filters when
//! explicit filters left gaps. Only the first mention per category is
//! promoted; later mentions are dropped, never merged (a deliberate,
//! documented limitation of the translation).

use crate::canonical::Canonicalizer;

use super::types::{EntityMentions, FilterSet};

/// Promote entity mentions into `filters`, filling gaps only.
///
/// A key the caller already provided is never overwritten. The subject-state
/// mention is model-scoped: it becomes `state` on `Subject`, the one-hop
/// `subject__state` on `Recording`, and is dropped for any other (or no)
/// model.
pub fn promote_entities(
    entities: &EntityMentions,
    model: Option<&str>,
    canonicalizer: &Canonicalizer,
    filters: &mut FilterSet,
) {
    if let Some(region) = entities.brain_regions.first() {
        fill(filters, "brain_region", canonicalizer.canonicalize(region));
    }

    if let Some(probe) = entities.probe_types.first() {
        fill(filters, "probe_type", canonicalizer.canonicalize(probe));
    }

    if let Some(state) = entities.subject_states.first() {
        let key = match model {
            Some("Subject") => Some("state"),
            Some("Recording") => Some("subject__state"),
            _ => None,
        };
        if let Some(key) = key {
            fill(filters, key, canonicalizer.canonicalize(state));
        } else {
            tracing::debug!(?model, state = %state, "dropping state mention for unscoped model");
        }
    }
}

fn fill(filters: &mut FilterSet, key: &str, value: String) {
    if !filters.contains_key(key) {
        filters.insert(key.to_string(), value);
    }
}
