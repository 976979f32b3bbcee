//! Model client abstraction and request/response types.

use askdocs_core::AppResult;
use serde::{Deserialize, Serialize};

/// Model invocation request.
///
/// Defaults match the pipeline's deterministic decoding profile: greedy
/// temperature, narrow sampling, answers capped at 500 tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRequest {
    /// The rendered prompt to send to the model
    pub prompt: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for sampling
    pub temperature: f32,

    /// Top-k sampling breadth
    pub top_k: u32,

    /// Top-p nucleus sampling
    pub top_p: f32,
}

impl ModelRequest {
    /// Create a request with the pipeline's fixed decoding parameters.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_tokens: 500,
            temperature: 0.0,
            top_k: 10,
            top_p: 1.0,
        }
    }

    /// Override the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Model invocation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The generated text, possibly wrapped in answer delimiters
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Token usage counters; recorded for observability only
    pub usage: TokenUsage,
}

/// Token usage counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u32,

    #[serde(default)]
    pub output_tokens: u32,

    #[serde(default)]
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Build usage counters from input and output token counts.
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// Trait for hosted model invocation services.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the provider name.
    fn provider_name(&self) -> &str;

    /// Perform a blocking, non-streaming completion.
    async fn complete(&self, request: &ModelRequest) -> AppResult<ModelResponse>;
}
