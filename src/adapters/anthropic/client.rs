//! Anthropic Messages API client.
//!
//! Makes direct HTTP calls to the Messages API. Each completion is one
//! stateless request/response round trip; no streaming, no retries.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::models::AnthropicConfig;
use crate::domain::ports::{CompletionBackend, CompletionRequest};

/// Message role in the Messages API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The user turn.
    User,
    /// The assistant turn.
    Assistant,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Who is speaking.
    pub role: MessageRole,
    /// Plain-text message content.
    pub content: String,
}

/// Request body for the Messages API.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    /// Model identifier.
    pub model: String,
    /// Cap on generated output tokens.
    pub max_tokens: u32,
    /// Optional system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The conversation; a single user message for this tool.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response content: the API normally returns a block sequence, but the
/// decode tolerates a bare string payload too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// A single text payload.
    Text(String),
    /// A sequence of content blocks of arbitrary shape.
    Blocks(Vec<Value>),
}

/// Response body for the Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    /// The generated content.
    pub content: MessageContent,
}

/// Extract the generated text from a response's content.
///
/// A bare string is used as-is. For a block sequence the first block's
/// `text` attribute is used; a block without one falls back to its JSON
/// string representation. An empty payload is an error, never silently
/// accepted.
pub fn extract_text(content: &MessageContent) -> AppResult<String> {
    let text = match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Blocks(blocks) => {
            let first = blocks.first().ok_or_else(|| {
                AppError::Generation("completion response had no content blocks".to_string())
            })?;
            match first.get("text").and_then(Value::as_str) {
                Some(text) => text.to_string(),
                None => first.to_string(),
            }
        }
    };

    if text.is_empty() {
        return Err(AppError::Generation(
            "completion response was empty".to_string(),
        ));
    }
    Ok(text)
}

/// HTTP client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    config: AnthropicConfig,
    api_key: String,
}

impl AnthropicClient {
    /// Create a client for the configured endpoint and per-session key.
    pub fn new(api_key: impl Into<String>, config: &AnthropicConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: config.clone(),
            api_key: api_key.into(),
        })
    }

    /// Send one Messages API request and decode the response.
    async fn send(&self, request: &MessagesRequest) -> AppResult<MessagesResponse> {
        let response = self
            .http
            .post(format!("{}/v1/messages", self.config.api_url))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Completion request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Transport(format!(
                "Completion API rejected the key ({status})"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Completion API error {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to parse completion response: {e}")))
    }
}

#[async_trait]
impl CompletionBackend for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let api_request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens,
            system: Some(request.system),
            messages: vec![Message {
                role: MessageRole::User,
                content: request.prompt,
            }],
            temperature: Some(request.temperature),
        };

        let response = self.send(&api_request).await?;
        extract_text(&response.content)
    }

    async fn verify_credentials(&self) -> AppResult<()> {
        let probe = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: 10,
            system: None,
            messages: vec![Message {
                role: MessageRole::User,
                content: "test".to_string(),
            }],
            temperature: None,
        };
        self.send(&probe).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extract_text_from_block_sequence() {
        let content = MessageContent::Blocks(vec![json!({ "type": "text", "text": "Summary." })]);
        assert_eq!(extract_text(&content).unwrap(), "Summary.");
    }

    #[test]
    fn extract_text_from_bare_string() {
        let content = MessageContent::Text("Summary.".to_string());
        assert_eq!(extract_text(&content).unwrap(), "Summary.");
    }

    #[test]
    fn block_without_text_falls_back_to_string_form() {
        let content = MessageContent::Blocks(vec![json!({ "type": "tool_use", "id": "x" })]);
        let text = extract_text(&content).unwrap();
        assert!(text.contains("tool_use"));
    }

    #[test]
    fn empty_blocks_are_a_generation_error() {
        let content = MessageContent::Blocks(vec![]);
        assert!(matches!(
            extract_text(&content),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn empty_string_is_a_generation_error() {
        let content = MessageContent::Text(String::new());
        assert!(matches!(
            extract_text(&content),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn request_serializes_without_absent_fields() {
        let request = MessagesRequest {
            model: "claude-3-sonnet-20240229".to_string(),
            max_tokens: 10,
            system: None,
            messages: vec![Message {
                role: MessageRole::User,
                content: "test".to_string(),
            }],
            temperature: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("system").is_none());
        assert!(value.get("temperature").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn response_decodes_block_content() {
        let body = json!({
            "content": [{ "type": "text", "text": "Done." }]
        });
        let response: MessagesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(extract_text(&response.content).unwrap(), "Done.");
    }
}
