//! Defaults Engine: keyword heuristics over the question text.
//!
//! Fills in the model and model-scoped filters that the collaborator and the
//! promotion step left unset. Pure over (question, model, filters); existing
//! keys are never overwritten.

use super::types::FilterSet;

/// Resolve the model and fill missing filters from question keywords.
///
/// Returns the resolved model, which stays `None` when neither the
/// suggestion nor the keyword heuristics produced one. Only the word "data"
/// defaults the model (to `Recording`); in particular a question about
/// subjects does not default to `Subject`. That asymmetry is preserved
/// behavior.
pub fn apply_defaults(
    model: Option<String>,
    filters: &mut FilterSet,
    question: &str,
) -> Option<String> {
    let question_lower = question.to_lowercase();

    let model = match model {
        Some(m) if !m.is_empty() => Some(m),
        _ => {
            if question_lower.contains("data") {
                Some("Recording".to_string())
            } else {
                None
            }
        }
    };

    match model.as_deref() {
        Some("Recording") => apply_recording_defaults(filters, &question_lower),
        Some("Subject") => apply_subject_defaults(filters, &question_lower),
        _ => {}
    }

    model
}

fn apply_recording_defaults(filters: &mut FilterSet, question_lower: &str) {
    if mentions_any(question_lower, &["hippocampus", "hippocampal"]) {
        fill(filters, "brain_region", "Hippocampus");
    }

    if mentions_any(question_lower, &["neuropixel", "neuropixels"]) {
        fill(filters, "probe_type", "Neuropixels");
    } else if mentions_any(question_lower, &["tetrode", "tetrodes"]) {
        fill(filters, "probe_type", "Tetrode");
    }

    if mentions_any(question_lower, &["sleeping", "sleep"]) {
        fill(filters, "subject__state", "REM");
    } else if mentions_any(question_lower, &["awake", "wake"]) {
        fill(filters, "subject__state", "awake");
    }
}

fn apply_subject_defaults(filters: &mut FilterSet, question_lower: &str) {
    if mentions_any(question_lower, &["sleeping", "sleep", "rem"]) {
        fill(filters, "state", "REM");
    } else if mentions_any(question_lower, &["awake", "wake"]) {
        fill(filters, "state", "awake");
    }
}

fn mentions_any(question_lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| question_lower.contains(term))
}

fn fill(filters: &mut FilterSet, key: &str, value: &str) {
    if !filters.contains_key(key) {
        filters.insert(key.to_string(), value.to_string());
    }
}
