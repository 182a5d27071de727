//! Caller-facing surface: one question in, capped rows (or a sentinel) out.
//!
//! Orchestrates the full flow: entity-summary pre-pass, structured
//! suggestion, promotion, defaults, validation, execution. The extractor's
//! two calls are sequential because the second prompt embeds the first's
//! output.

use std::sync::Arc;

use crate::canonical::Canonicalizer;
use crate::error::{NeuroqueryError, Result};
use crate::extractor::EntityExtractor;
use crate::query::{
    apply_defaults, flatten_filters, promote_entities, validate, QueryExecutor, QueryPayload,
    RawSuggestion, ResultRow,
};
use crate::schema::Schema;
use crate::store::DataStore;

/// Answers free-text questions about the dataset.
pub struct QueryAssistant {
    schema: Arc<Schema>,
    canonicalizer: Canonicalizer,
    extractor: Arc<dyn EntityExtractor>,
    executor: QueryExecutor,
    two_pass: bool,
}

/// What the interactive caller shows for one question. Errors are folded in
/// so a bad question never terminates the session.
#[derive(Debug)]
pub enum AskOutcome {
    /// Capped result rows, or the one-element no-results sentinel.
    Rows(Vec<ResultRow>),
    /// The collaborator produced no actionable suggestion.
    ExtractionFailed(String),
    /// The suggestion failed schema or shape validation.
    Invalid(String),
    /// Anything else; reported generically.
    Failed(String),
}

impl QueryAssistant {
    pub fn new(
        schema: Arc<Schema>,
        extractor: Arc<dyn EntityExtractor>,
        store: Arc<dyn DataStore>,
        two_pass: bool,
    ) -> Self {
        let canonicalizer = Canonicalizer::new(schema.clone());
        let executor = QueryExecutor::new(canonicalizer.clone(), store);
        Self {
            schema,
            canonicalizer,
            extractor,
            executor,
            two_pass,
        }
    }

    /// Answer one question. Errors propagate; use [`ask_report`] at an
    /// interactive boundary.
    ///
    /// [`ask_report`]: Self::ask_report
    pub async fn ask(&self, question: &str) -> Result<Vec<ResultRow>> {
        let summary = if self.two_pass {
            let summary = self.extractor.summarize_entities(question).await?;
            tracing::debug!(summary, "entity pre-pass complete");
            Some(summary)
        } else {
            None
        };

        let suggestion = self
            .extractor
            .build_suggestion(question, summary.as_deref())
            .await?;

        let payload = self.translate(question, suggestion)?;
        self.executor.execute(&payload).await
    }

    /// Translate an untrusted suggestion into a validated payload.
    ///
    /// Pure with respect to (question, suggestion); exposed so the pipeline
    /// can be exercised without a data store.
    pub fn translate(&self, question: &str, suggestion: RawSuggestion) -> Result<QueryPayload> {
        let mut filters = flatten_filters(&suggestion.filters)?;

        promote_entities(
            &suggestion.entities,
            suggestion.model.as_deref(),
            &self.canonicalizer,
            &mut filters,
        );
        let model = apply_defaults(suggestion.model, &mut filters, question);
        tracing::debug!(?model, ?filters, "promotion and defaults applied");

        validate(&self.schema, model, filters, &self.canonicalizer)
    }

    /// Answer one question for an interactive caller, folding every failure
    /// into a presentable outcome. No retries; retrying is the caller's call.
    pub async fn ask_report(&self, question: &str) -> AskOutcome {
        match self.ask(question).await {
            Ok(rows) => AskOutcome::Rows(rows),
            Err(NeuroqueryError::Extraction(e)) => {
                tracing::warn!(error = %e, "extraction failed");
                AskOutcome::ExtractionFailed(
                    "I couldn't turn that into a query. Try asking again with more detail \
                     about what you want to see."
                        .to_string(),
                )
            }
            Err(err @ (NeuroqueryError::Schema(_) | NeuroqueryError::Shape(_))) => {
                tracing::warn!(error = %err, "suggestion failed validation");
                AskOutcome::Invalid(format!("The suggested query was not valid: {err}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "question failed");
                AskOutcome::Failed("Something went wrong answering that question.".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ScriptedExtractor;
    use crate::query::EntityMentions;
    use crate::store::MemoryStore;

    fn assistant_with(extractor: ScriptedExtractor) -> QueryAssistant {
        let schema = Arc::new(Schema::builtin());
        QueryAssistant::new(
            schema,
            Arc::new(extractor),
            Arc::new(MemoryStore::new()),
            false,
        )
    }

    #[test]
    fn test_translate_promotes_and_defaults() {
        let assistant = assistant_with(ScriptedExtractor::new());
        let suggestion = RawSuggestion {
            model: Some("Recording".to_string()),
            entities: EntityMentions {
                brain_regions: vec!["hippo".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        let payload = assistant
            .translate("recordings from hippocampus while sleeping", suggestion)
            .unwrap();
        assert_eq!(payload.model(), "Recording");
        assert_eq!(
            payload.filters().get("brain_region").map(String::as_str),
            Some("Hippocampus")
        );
        assert_eq!(
            payload.filters().get("subject__state").map(String::as_str),
            Some("REM")
        );
    }

    #[test]
    fn test_translate_rejects_unknown_model() {
        let assistant = assistant_with(ScriptedExtractor::new());
        let suggestion = RawSuggestion {
            model: Some("Session".to_string()),
            ..Default::default()
        };
        let err = assistant.translate("sessions please", suggestion).unwrap_err();
        assert!(matches!(err, NeuroqueryError::Schema(_)));
    }

    #[tokio::test]
    async fn test_ask_report_folds_extraction_failure() {
        // No script entries: every question looks like a missing tool call.
        let assistant = assistant_with(ScriptedExtractor::new());
        let outcome = assistant.ask_report("anything at all").await;
        assert!(matches!(outcome, AskOutcome::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_ask_report_folds_validation_failure() {
        let suggestion = RawSuggestion {
            model: Some("Plan".to_string()),
            ..Default::default()
        };
        let assistant = assistant_with(ScriptedExtractor::new().with("plans", suggestion));
        let outcome = assistant.ask_report("show me plans").await;
        assert!(matches!(outcome, AskOutcome::Invalid(_)));
    }
}
