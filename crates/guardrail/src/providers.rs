//! Managed guardrail service client.
//!
//! Speaks the guardrail runtime REST contract:
//! `POST {base}/guardrail/{identifier}/version/{version}/apply` with the
//! screened text, direction tag and `guard_content` qualifier in the body.
//! The correlation id comes back in the `x-amzn-requestid` response header.

use crate::client::{FilterVerdict, SafetyFilter};
use askdocs_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Direction tag sent with every check. Both the question and the answer are
/// screened as input content, matching the deployed guardrail policy.
const SOURCE: &str = "INPUT";

/// Guardrail apply request body.
#[derive(Debug, Serialize)]
struct ApplyRequest<'a> {
    source: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    text: TextBlock<'a>,
}

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    text: &'a str,
    qualifiers: Vec<&'static str>,
}

/// Guardrail apply response body. Only the action code matters here; topic
/// and filter assessments are ignored.
#[derive(Debug, Deserialize)]
struct ApplyResponse {
    action: String,
}

/// Client for the managed guardrail service.
pub struct BedrockGuardrail {
    base_url: String,
    guardrail_id: String,
    guardrail_version: String,
    client: reqwest::Client,
}

impl BedrockGuardrail {
    /// Create a client with a shared HTTP handle.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        guardrail_id: impl Into<String>,
        guardrail_version: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            guardrail_id: guardrail_id.into(),
            guardrail_version: guardrail_version.into(),
            client,
        }
    }

    fn apply_url(&self) -> String {
        format!(
            "{}/guardrail/{}/version/{}/apply",
            self.base_url, self.guardrail_id, self.guardrail_version
        )
    }

    fn request_body<'a>(&self, text: &'a str) -> ApplyRequest<'a> {
        ApplyRequest {
            source: SOURCE,
            content: vec![ContentBlock {
                text: TextBlock {
                    text,
                    qualifiers: vec!["guard_content"],
                },
            }],
        }
    }
}

#[async_trait::async_trait]
impl SafetyFilter for BedrockGuardrail {
    fn guardrail_id(&self) -> &str {
        &self.guardrail_id
    }

    async fn check(&self, text: &str) -> AppResult<FilterVerdict> {
        tracing::debug!(guardrail = %self.guardrail_id, "Applying guardrail");

        let response = self
            .client
            .post(self.apply_url())
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| AppError::Guardrail(format!("Failed to reach guardrail: {}", e)))?;

        let request_id = response
            .headers()
            .get("x-amzn-requestid")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-")
            .to_string();

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Guardrail(format!(
                "Guardrail API error ({}): {}",
                status, error_text
            )));
        }

        let body: ApplyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Guardrail(format!("Failed to parse guardrail response: {}", e)))?;

        Ok(FilterVerdict {
            action: body.action,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> BedrockGuardrail {
        BedrockGuardrail::new(
            reqwest::Client::new(),
            "https://guardrail.example.com",
            "gr-1234",
            "2",
        )
    }

    #[test]
    fn test_apply_url() {
        let client = test_client();
        assert_eq!(
            client.apply_url(),
            "https://guardrail.example.com/guardrail/gr-1234/version/2/apply"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let client = test_client();
        let body = serde_json::to_value(client.request_body("is this safe?")).unwrap();
        assert_eq!(body["source"], "INPUT");
        assert_eq!(body["content"][0]["text"]["text"], "is this safe?");
        assert_eq!(body["content"][0]["text"]["qualifiers"][0], "guard_content");
    }

    #[test]
    fn test_response_parsing() {
        let body: ApplyResponse =
            serde_json::from_str(r#"{"action":"GUARDRAIL_INTERVENED","outputs":[]}"#).unwrap();
        assert_eq!(body.action, "GUARDRAIL_INTERVENED");
    }
}
