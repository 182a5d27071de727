//! Scripted extractor for tests and offline runs.

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::query::RawSuggestion;

use super::EntityExtractor;

/// Returns canned suggestions keyed by question substring.
///
/// A question matching no script entry behaves like a collaborator that made
/// no actionable tool call.
#[derive(Default)]
pub struct ScriptedExtractor {
    scripts: Vec<(String, RawSuggestion)>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned suggestion for questions containing `fragment`.
    pub fn with(mut self, fragment: impl Into<String>, suggestion: RawSuggestion) -> Self {
        self.scripts.push((fragment.into(), suggestion));
        self
    }
}

#[async_trait]
impl EntityExtractor for ScriptedExtractor {
    async fn summarize_entities(&self, _question: &str) -> crate::error::Result<String> {
        Ok(String::new())
    }

    async fn build_suggestion(
        &self,
        question: &str,
        _entity_summary: Option<&str>,
    ) -> crate::error::Result<RawSuggestion> {
        self.scripts
            .iter()
            .find(|(fragment, _)| question.contains(fragment.as_str()))
            .map(|(_, suggestion)| suggestion.clone())
            .ok_or_else(|| ExtractionError::NoToolCall.into())
    }
}
