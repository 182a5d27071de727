//! Entity extractor trait definitions.

use async_trait::async_trait;

use crate::query::RawSuggestion;

/// The natural-language-understanding collaborator.
///
/// The richer flow makes two sequential calls per question: a free-text
/// entity summary first, then the structured-query pass with that summary
/// embedded in the prompt. The second call depends on the first's output,
/// so the two are never issued concurrently.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Free-text pre-pass: list the entities visible in the question.
    async fn summarize_entities(&self, question: &str) -> crate::error::Result<String>;

    /// Structured pass: propose a model, entity mentions, and filters.
    ///
    /// The output is a suggestion, not an answer; it must still pass
    /// promotion, defaults, and validation.
    async fn build_suggestion(
        &self,
        question: &str,
        entity_summary: Option<&str>,
    ) -> crate::error::Result<RawSuggestion>;
}
