//! Integration tests for neuroquery.
//!
//! These tests exercise the complete pipeline, from a question through a
//! scripted collaborator suggestion to rows out of a seeded memory store.

#[path = "integration/test_pipeline.rs"]
mod test_pipeline;

#[path = "integration/test_startup.rs"]
mod test_startup;
