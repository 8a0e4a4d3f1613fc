//! Completion backend port - interface to the LLM text-generation API.

use async_trait::async_trait;

use crate::domain::errors::AppResult;

/// A single stateless completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction framing the model's role.
    pub system: String,
    /// User message containing the rendered prompt.
    pub prompt: String,
    /// Cap on generated output tokens.
    pub max_tokens: u32,
    /// Sampling temperature; 0.0 makes the output deterministic.
    pub temperature: f32,
}

/// Text-completion backend.
///
/// One invocation is one request/response round trip; no streaming and
/// no session state.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Request a completion and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;

    /// Minimal probe call verifying the configured credentials.
    async fn verify_credentials(&self) -> AppResult<()>;
}
