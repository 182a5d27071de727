//! End-to-end pipeline tests with a scripted collaborator.

use std::sync::Arc;

use serde_json::Value;

use neuroquery::{
    is_no_results_row, seed_demo_data, AskOutcome, EntityMentions, MemoryStore, QueryAssistant,
    RawSuggestion, Schema, ScriptedExtractor, MAX_ROWS,
};

fn suggestion(model: Option<&str>, mentions: EntityMentions) -> RawSuggestion {
    RawSuggestion {
        model: model.map(|m| m.to_string()),
        entities: mentions,
        ..Default::default()
    }
}

fn probe_mentions(probe: &str) -> EntityMentions {
    EntityMentions {
        probe_types: vec![probe.to_string()],
        ..Default::default()
    }
}

fn region_mentions(region: &str) -> EntityMentions {
    EntityMentions {
        brain_regions: vec![region.to_string()],
        ..Default::default()
    }
}

async fn seeded_assistant(extractor: ScriptedExtractor) -> QueryAssistant {
    let schema = Arc::new(Schema::builtin());
    let store = Arc::new(MemoryStore::new());
    seed_demo_data(&store).await;
    QueryAssistant::new(schema, Arc::new(extractor), store, false)
}

#[tokio::test]
async fn test_tetrode_recordings_question() {
    // "show me tetrode recordings": the probe mention is promoted to a
    // canonical probe_type filter on the Recording model.
    let extractor = ScriptedExtractor::new().with(
        "tetrode",
        suggestion(Some("Recording"), probe_mentions("tetrode")),
    );
    let assistant = seeded_assistant(extractor).await;

    let payload = assistant
        .translate(
            "show me tetrode recordings",
            suggestion(Some("Recording"), probe_mentions("tetrode")),
        )
        .unwrap();
    assert_eq!(payload.model(), "Recording");
    assert_eq!(
        payload.filters().get("probe_type").map(String::as_str),
        Some("Tetrode")
    );

    let rows = assistant.ask("show me tetrode recordings").await.unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(
            row.get("probe_type").and_then(Value::as_str),
            Some("Tetrode")
        );
    }
}

#[tokio::test]
async fn test_hippocampus_while_sleeping_question() {
    // The region comes from the suggestion's entities; the subject state
    // comes from the defaults engine reading "sleeping" in the question.
    let question = "recordings from hippocampus while the animal was sleeping";
    let extractor = ScriptedExtractor::new().with(
        "hippocampus",
        suggestion(Some("Recording"), region_mentions("hippocampus")),
    );
    let assistant = seeded_assistant(extractor).await;

    let payload = assistant
        .translate(
            question,
            suggestion(Some("Recording"), region_mentions("hippocampus")),
        )
        .unwrap();
    assert_eq!(
        payload.filters().get("brain_region").map(String::as_str),
        Some("Hippocampus")
    );
    assert_eq!(
        payload.filters().get("subject__state").map(String::as_str),
        Some("REM")
    );

    let rows = assistant.ask(question).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_subjects_awake_without_model_fails_validation() {
    // Only the word "data" defaults the model; a subject question with no
    // model in the suggestion resolves nothing and is rejected, by design.
    let question = "subjects that are awake";
    let extractor = ScriptedExtractor::new().with(
        "awake",
        suggestion(
            None,
            EntityMentions {
                subject_states: vec!["awake".to_string()],
                ..Default::default()
            },
        ),
    );
    let assistant = seeded_assistant(extractor).await;

    let outcome = assistant.ask_report(question).await;
    assert!(matches!(outcome, AskOutcome::Invalid(_)));
}

#[tokio::test]
async fn test_non_string_filter_value_is_rejected() {
    let mut bad = suggestion(Some("Recording"), EntityMentions::default());
    bad.filters
        .insert("brain_region".to_string(), Value::from(42));
    let extractor = ScriptedExtractor::new().with("weird", bad);
    let assistant = seeded_assistant(extractor).await;

    let outcome = assistant.ask_report("something weird").await;
    assert!(matches!(outcome, AskOutcome::Invalid(_)));
}

#[tokio::test]
async fn test_no_results_sentinel_end_to_end() {
    let extractor = ScriptedExtractor::new().with(
        "cerebellum",
        suggestion(Some("Recording"), region_mentions("cerebellum")),
    );
    let assistant = seeded_assistant(extractor).await;

    let rows = assistant.ask("recordings from cerebellum").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(is_no_results_row(&rows[0]));
}

#[tokio::test]
async fn test_row_cap_end_to_end() {
    let schema = Arc::new(Schema::builtin());
    let store = Arc::new(MemoryStore::new());
    for i in 0..(MAX_ROWS + 15) {
        store
            .insert_row(
                "Recording",
                neuroquery::store::row(&[
                    ("id", i.to_string().as_str()),
                    ("brain_region", "V1"),
                    ("probe_type", "Neuropixels"),
                ]),
            )
            .await;
    }

    let extractor = ScriptedExtractor::new()
        .with("v1", suggestion(Some("Recording"), region_mentions("v1")));
    let assistant = QueryAssistant::new(schema, Arc::new(extractor), store, false);

    let rows = assistant.ask("recordings from v1").await.unwrap();
    assert_eq!(rows.len(), MAX_ROWS);
}

#[tokio::test]
async fn test_unanswerable_question_reports_extraction_failure() {
    let assistant = seeded_assistant(ScriptedExtractor::new()).await;
    let outcome = assistant.ask_report("what is the meaning of life").await;
    assert!(matches!(outcome, AskOutcome::ExtractionFailed(_)));
}
