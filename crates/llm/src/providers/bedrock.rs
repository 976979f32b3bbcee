//! Hosted model invocation client.
//!
//! Speaks the model runtime's invoke contract:
//! `POST {base}/model/{model_id}/invoke` with a messages-style body and the
//! decoding parameters; the response carries content blocks and token-usage
//! counters. Request signing is handled by the deployment environment.

use crate::client::{ModelClient, ModelRequest, ModelResponse, TokenUsage};
use askdocs_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Invoke request body.
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Invoke response body.
#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize, Default)]
struct WireUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// Client for the hosted model invocation service.
pub struct BedrockModel {
    base_url: String,
    client: reqwest::Client,
}

impl BedrockModel {
    /// Create a client with a shared HTTP handle.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn to_invoke_request<'a>(&self, request: &'a ModelRequest) -> InvokeRequest<'a> {
        InvokeRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_k: request.top_k,
            top_p: request.top_p,
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock {
                    kind: "text",
                    text: &request.prompt,
                }],
            }],
        }
    }

    fn convert_response(&self, model: &str, response: InvokeResponse) -> ModelResponse {
        let content = response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        ModelResponse {
            content,
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for BedrockModel {
    fn provider_name(&self) -> &str {
        "bedrock"
    }

    async fn complete(&self, request: &ModelRequest) -> AppResult<ModelResponse> {
        tracing::info!(model = %request.model, "Invoking model");

        let url = format!("{}/model/{}/invoke", self.base_url, request.model);
        let response = self
            .client
            .post(&url)
            .json(&self.to_invoke_request(request))
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to invoke model: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "Model API error ({}): {}",
                status, error_text
            )));
        }

        let invoke_response: InvokeResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse model response: {}", e)))?;

        let model_response = self.convert_response(&request.model, invoke_response);
        tracing::debug!(
            input_tokens = model_response.usage.input_tokens,
            output_tokens = model_response.usage.output_tokens,
            "Model invocation complete"
        );

        Ok(model_response)
    }
}
