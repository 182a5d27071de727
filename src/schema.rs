//! Schema Registry: the closed domain vocabulary.
//!
//! A schema names the queryable models, the filterable fields of each
//! (including one-hop relationship paths such as `subject__state`), and an
//! alias table mapping informal terms to canonical field values. It is
//! loaded once at startup and never mutated.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The domain vocabulary. Read-only after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    /// Model name -> filterable field names (may include one-hop paths).
    models: BTreeMap<String, BTreeSet<String>>,
    /// Lowercased raw term -> canonical value.
    aliases: HashMap<String, String>,
}

/// Raw TOML shape; both tables are required.
#[derive(Debug, Deserialize)]
struct SchemaDocument {
    models: Option<BTreeMap<String, BTreeSet<String>>>,
    aliases: Option<HashMap<String, String>>,
}

impl Schema {
    /// Load a schema from a TOML file. Any failure here is fatal to startup.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse a schema from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let doc: SchemaDocument = toml::from_str(content).map_err(ConfigError::Parse)?;
        let models = doc
            .models
            .ok_or_else(|| ConfigError::MissingField("models".to_string()))?;
        let aliases = doc
            .aliases
            .ok_or_else(|| ConfigError::MissingField("aliases".to_string()))?;
        if models.is_empty() {
            return Err(ConfigError::Invalid("models table is empty".to_string()).into());
        }
        Ok(Self::new(models, aliases))
    }

    /// Build a schema from parts. Alias keys are lowercased for lookup.
    pub fn new(
        models: BTreeMap<String, BTreeSet<String>>,
        aliases: HashMap<String, String>,
    ) -> Self {
        let aliases = aliases
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { models, aliases }
    }

    /// The built-in lab schema: subjects and their neural recordings.
    pub fn builtin() -> Self {
        let mut models = BTreeMap::new();
        models.insert(
            "Subject".to_string(),
            ["name", "state"].iter().map(|s| s.to_string()).collect(),
        );
        models.insert(
            "Recording".to_string(),
            ["subject", "brain_region", "probe_type", "subject__state"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );

        let aliases = [
            ("hippo", "Hippocampus"),
            ("hpc", "Hippocampus"),
            ("v-1", "V1"),
            ("visual cortex", "V1"),
            ("npx", "Neuropixels"),
            ("rem sleep", "REM"),
            ("asleep", "REM"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self::new(models, aliases)
    }

    /// Known model names, in deterministic order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|s| s.as_str())
    }

    /// Whether `name` is a known model.
    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Filterable fields of a model, if the model exists.
    pub fn fields_of(&self, model: &str) -> Option<&BTreeSet<String>> {
        self.models.get(model)
    }

    /// Exact alias lookup; the key is lowercased before the probe.
    pub fn alias_lookup(&self, term: &str) -> Option<&str> {
        self.aliases.get(&term.to_lowercase()).map(|s| s.as_str())
    }
}
