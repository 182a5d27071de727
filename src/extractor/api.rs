//! API-based entity extractor (OpenAI-compatible chat completions).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ExtractorConfig;
use crate::error::{ExtractionError, Result};
use crate::query::RawSuggestion;
use crate::schema::Schema;

use super::EntityExtractor;

/// Name of the single tool the collaborator is asked to call.
const TOOL_NAME: &str = "build_structured_query";

/// OpenAI-compatible chat-completions extractor.
pub struct ApiExtractor {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    schema: Arc<Schema>,
}

/// Chat completion request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolDefinition {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDefinition,
}

#[derive(Debug, Serialize)]
struct FunctionDefinition {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

/// Chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

/// OpenAI error response format.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl ApiExtractor {
    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractorConfig, schema: Arc<Schema>) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ExtractionError::Api(
                    "API key not provided and OPENAI_API_KEY env var not set".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractionError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            schema,
        })
    }

    fn tool_definition() -> Result<ToolDefinition> {
        let parameters = serde_json::to_value(schemars::schema_for!(RawSuggestion))?;
        Ok(ToolDefinition {
            kind: "function",
            function: FunctionDefinition {
                name: TOOL_NAME,
                description: "Turn a plain-English question about the dataset into a \
                              structured query suggestion: a model name, raw entity \
                              mentions, and optional explicit filters.",
                parameters,
            },
        })
    }

    fn system_prompt(&self) -> String {
        let schema_json =
            serde_json::to_string_pretty(self.schema.as_ref()).unwrap_or_default();
        format!(
            "You translate questions about a lab dataset into structured query \
             suggestions. You know this schema:\n{schema_json}"
        )
    }

    async fn chat(&self, request: &ChatRequest<'_>) -> Result<ResponseMessage> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::Api("Request timed out".to_string())
                } else if e.is_connect() {
                    ExtractionError::Api(format!("Connection failed: {}", e))
                } else {
                    ExtractionError::Api(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let mut result: ChatResponse = response
                .json()
                .await
                .map_err(|e| ExtractionError::Api(format!("Failed to parse response: {}", e)))?;
            if result.choices.is_empty() {
                return Err(ExtractionError::Api("Response carried no choices".to_string()).into());
            }
            Ok(result.choices.remove(0).message)
        } else if status.as_u16() == 429 {
            Err(ExtractionError::RateLimited.into())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                Err(ExtractionError::Api(format!(
                    "API error ({}): {}",
                    status, error_response.error.message
                ))
                .into())
            } else {
                Err(ExtractionError::Api(format!("API error ({}): {}", status, error_text)).into())
            }
        }
    }
}

#[async_trait]
impl EntityExtractor for ApiExtractor {
    async fn summarize_entities(&self, question: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                Message {
                    role: "system",
                    content: "List the entities mentioned in the question that belong to a \
                              neuroscience lab dataset: brain regions, probe types, and \
                              subject states. Answer in one short line."
                        .to_string(),
                },
                Message {
                    role: "user",
                    content: question.to_string(),
                },
            ],
            tools: None,
        };

        let message = self.chat(&request).await?;
        Ok(message.content.unwrap_or_default())
    }

    async fn build_suggestion(
        &self,
        question: &str,
        entity_summary: Option<&str>,
    ) -> Result<RawSuggestion> {
        let user_content = match entity_summary {
            Some(summary) if !summary.is_empty() => {
                format!("{question}\n\nEntities noticed in a first pass: {summary}")
            }
            _ => question.to_string(),
        };

        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                Message {
                    role: "system",
                    content: self.system_prompt(),
                },
                Message {
                    role: "user",
                    content: user_content,
                },
            ],
            tools: Some(vec![Self::tool_definition()?]),
        };

        let message = self.chat(&request).await?;

        let call = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .find(|c| c.function.name == TOOL_NAME)
            .ok_or(ExtractionError::NoToolCall)?;

        let arguments: Value = serde_json::from_str(&call.function.arguments)
            .map_err(ExtractionError::Malformed)?;

        tracing::debug!(%arguments, "collaborator suggestion received");
        RawSuggestion::from_value(arguments)
    }
}
