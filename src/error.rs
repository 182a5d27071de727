//! Error types for the neuroquery pipeline.

use thiserror::Error;

/// Main error type for neuroquery operations.
#[derive(Error, Debug)]
pub enum NeuroqueryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration and schema-source errors. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors from the natural-language-understanding collaborator.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Collaborator returned no structured query suggestion")]
    NoToolCall,

    #[error("Could not parse the suggested query arguments: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited")]
    RateLimited,
}

/// The resolved model or a filter field is not part of the known schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("No model resolved from the question or suggestion")]
    MissingModel,

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown filter field {field} for model {model}")]
    UnknownField { model: String, field: String },
}

/// The structured suggestion does not conform to the expected filter shape.
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Filter value for {field} is not a string")]
    NonStringValue { field: String },

    #[error("Filters must be a flat mapping of field name to string value")]
    NotAMapping,
}

/// Data store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Query error: {0}")]
    Query(String),
}

/// Result type alias for neuroquery operations.
pub type Result<T> = std::result::Result<T, NeuroqueryError>;
