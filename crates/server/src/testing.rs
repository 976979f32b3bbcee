//! Mock collaborator implementations shared by pipeline and handler tests.

use askdocs_core::{AppError, AppResult};
use askdocs_guardrail::{FilterVerdict, SafetyFilter};
use askdocs_llm::{ModelClient, ModelRequest, ModelResponse, TokenUsage};
use askdocs_retrieval::{ResultItem, RetrievedContext, SearchIndex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Guardrail that passes every check until `block_from` checks have run.
pub struct MockFilter {
    pub calls: AtomicUsize,
    block_from: usize,
}

impl MockFilter {
    pub fn passing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            block_from: usize::MAX,
        }
    }

    /// Block the `block_from`-th check and every one after it (0-based).
    pub fn blocking_from(block_from: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            block_from,
        }
    }
}

#[async_trait::async_trait]
impl SafetyFilter for MockFilter {
    fn guardrail_id(&self) -> &str {
        "mock-guardrail"
    }

    async fn check(&self, _text: &str) -> AppResult<FilterVerdict> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let action = if call >= self.block_from {
            "GUARDRAIL_INTERVENED"
        } else {
            "NONE"
        };
        Ok(FilterVerdict {
            action: action.to_string(),
            request_id: format!("req-{}", call),
        })
    }
}

/// Search index serving a fixed result list, or a fixed error.
pub struct MockIndex {
    pub calls: AtomicUsize,
    items: Vec<ResultItem>,
    failure: Option<String>,
}

impl MockIndex {
    pub fn with_items(items: Vec<ResultItem>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            items,
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            items: vec![],
            failure: Some(message.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl SearchIndex for MockIndex {
    async fn retrieve(&self, _query: &str) -> AppResult<RetrievedContext> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(AppError::Retrieval(message.clone())),
            None => Ok(RetrievedContext::new(self.items.clone())),
        }
    }
}

/// Model returning a fixed reply and capturing the last prompt it saw.
pub struct MockModel {
    pub calls: AtomicUsize,
    reply: String,
    last_prompt: Mutex<Option<String>>,
}

impl MockModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> String {
        self.last_prompt
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ModelClient for MockModel {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &ModelRequest) -> AppResult<ModelResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt.clone());
        Ok(ModelResponse {
            content: self.reply.clone(),
            model: request.model.clone(),
            usage: TokenUsage::new(100, 20),
        })
    }
}
