//! Shared application state.
//!
//! Collaborator clients are constructed once at process start and reused for
//! every request; nothing here is mutated after startup.

use crate::pipeline::Pipeline;
use askdocs_core::{AppError, AppResult, ServiceConfig};
use askdocs_guardrail::{BedrockGuardrail, SafetyFilter};
use askdocs_llm::{BedrockModel, ModelClient};
use askdocs_retrieval::{KendraClient, SearchIndex};
use std::sync::Arc;
use std::time::Duration;

/// Outbound request timeout for all collaborator calls.
const COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(60);

/// Long-lived handles shared by all request handlers.
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    /// Build the state from validated startup configuration.
    pub fn from_config(config: &ServiceConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(COLLABORATOR_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let filter = Arc::new(BedrockGuardrail::new(
            http.clone(),
            config.guardrail_endpoint.clone(),
            config.guardrail_id.clone(),
            config.guardrail_version.clone(),
        ));
        let index = Arc::new(KendraClient::new(
            http.clone(),
            config.retrieval_endpoint.clone(),
            config.search_index_id.clone(),
        ));
        let model = Arc::new(BedrockModel::new(http, config.model_endpoint.clone()));

        Ok(Self::new(filter, index, model, config.model_id.clone()))
    }

    /// Build the state from explicit collaborator handles.
    pub fn new(
        filter: Arc<dyn SafetyFilter>,
        index: Arc<dyn SearchIndex>,
        model: Arc<dyn ModelClient>,
        model_id: String,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(filter, index, model, model_id),
        }
    }
}
