//! Natural-language-understanding collaborator boundary.
//!
//! The extractor proposes what a question is asking for; its output is
//! treated as untrusted input everywhere downstream.

mod api;
mod scripted;
mod traits;

pub use api::ApiExtractor;
pub use scripted::ScriptedExtractor;
pub use traits::EntityExtractor;
