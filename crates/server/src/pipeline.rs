//! The request-answering pipeline.
//!
//! A linear chain with no backward transitions and no retries: screen the
//! question, retrieve context, render the prompt, invoke the model, extract
//! the answer, screen the answer, derive links, assemble the response. The
//! two guardrail checkpoints may terminate the chain early with a policy
//! rejection; every other failure propagates as an internal fault.

use askdocs_core::{AppError, AppResult};
use askdocs_guardrail::SafetyFilter;
use askdocs_llm::{ModelClient, ModelRequest};
use askdocs_prompt::{extract_answer, render_prompt};
use askdocs_retrieval::{link_for_document, SearchIndex};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Final response payload.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub answer: String,
    pub relevant_links: Vec<String>,
}

/// One pipeline instance, shared across requests.
pub struct Pipeline {
    filter: Arc<dyn SafetyFilter>,
    index: Arc<dyn SearchIndex>,
    model: Arc<dyn ModelClient>,
    model_id: String,
}

impl Pipeline {
    pub fn new(
        filter: Arc<dyn SafetyFilter>,
        index: Arc<dyn SearchIndex>,
        model: Arc<dyn ModelClient>,
        model_id: String,
    ) -> Self {
        Self {
            filter,
            index,
            model,
            model_id,
        }
    }

    /// Answer a validated, non-empty question.
    pub async fn answer(&self, question: &str) -> AppResult<Answer> {
        // Screen the question before touching any other collaborator.
        self.screen(question).await?;

        let retrieved = self.index.retrieve(question).await?;
        let prompt = render_prompt(question, &retrieved.concatenated())?;

        let request = ModelRequest::new(prompt, &self.model_id);
        let response = self.model.complete(&request).await?;
        tracing::info!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            total_tokens = response.usage.total_tokens,
            "Model token usage"
        );

        let answer = extract_answer(&response.content)?;

        // Same screening as the question, applied to the extracted answer.
        self.screen(&answer).await?;

        // Links come from a second retrieval for the same question, not from
        // the result used for the prompt. Observable behavior of the service;
        // likely an unintentional extra call, kept until confirmed otherwise.
        let retrieved = self.index.retrieve(question).await?;
        let links: BTreeSet<String> = retrieved
            .document_ids()
            .filter_map(link_for_document)
            .collect();

        Ok(Answer {
            answer: answer.trim().to_string(),
            relevant_links: links.into_iter().collect(),
        })
    }

    /// Apply the guardrail to one text; a non-pass verdict aborts the chain.
    async fn screen(&self, text: &str) -> AppResult<()> {
        let verdict = self.filter.check(text).await?;

        if !verdict.passed() {
            tracing::warn!(
                guardrail = %self.filter.guardrail_id(),
                request_id = %verdict.request_id,
                action = %verdict.action,
                "Guardrail intervened"
            );
            return Err(AppError::GuardrailBlocked {
                guardrail_id: self.filter.guardrail_id().to_string(),
                request_id: verdict.request_id,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFilter, MockIndex, MockModel};
    use askdocs_retrieval::ResultItem;
    use std::sync::atomic::Ordering;

    fn docs() -> Vec<ResultItem> {
        vec![
            ResultItem {
                document_id: "s3://bucket/rag/lambda-developer-guide-231030/foo.md".to_string(),
                content: "Content Foo".to_string(),
            },
            ResultItem {
                document_id: "s3://bucket/rag/blogs/bar.md".to_string(),
                content: "Content Bar".to_string(),
            },
        ]
    }

    fn pipeline(
        filter: Arc<MockFilter>,
        index: Arc<MockIndex>,
        model: Arc<MockModel>,
    ) -> Pipeline {
        Pipeline::new(filter, index, model, "example.model-v1".to_string())
    }

    #[tokio::test]
    async fn test_happy_path() {
        let filter = Arc::new(MockFilter::passing());
        let index = Arc::new(MockIndex::with_items(docs()));
        let model = Arc::new(MockModel::replying("<answer>fake_answer</answer>"));

        let answer = pipeline(filter.clone(), index.clone(), model.clone())
            .answer("What is Lambda?")
            .await
            .unwrap();

        assert_eq!(answer.answer, "fake_answer");
        assert_eq!(
            answer.relevant_links,
            vec![
                "https://aws.amazon.com/blogs/compute/bar/".to_string(),
                "https://docs.aws.amazon.com/lambda/latest/dg/foo.html".to_string(),
            ]
        );

        // Question and answer were both screened; retrieval ran twice.
        assert_eq!(filter.calls.load(Ordering::SeqCst), 2);
        assert_eq!(index.calls.load(Ordering::SeqCst), 2);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        // The rendered prompt carries the concatenated context and question.
        let prompt = model.last_prompt();
        assert!(prompt.contains("Content Foo\nContent Bar"));
        assert!(prompt.contains("What is Lambda?"));
    }

    #[tokio::test]
    async fn test_blocked_question_short_circuits() {
        let filter = Arc::new(MockFilter::blocking_from(0));
        let index = Arc::new(MockIndex::with_items(docs()));
        let model = Arc::new(MockModel::replying("<answer>unused</answer>"));

        let err = pipeline(filter.clone(), index.clone(), model.clone())
            .answer("something nasty")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::GuardrailBlocked { .. }));
        assert_eq!(err.to_string(), "Content was blocked by guardrail");

        // Neither the index nor the model was contacted.
        assert_eq!(index.calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blocked_answer_after_model_ran() {
        let filter = Arc::new(MockFilter::blocking_from(1));
        let index = Arc::new(MockIndex::with_items(docs()));
        let model = Arc::new(MockModel::replying("<answer>blocked content</answer>"));

        let err = pipeline(filter.clone(), index.clone(), model.clone())
            .answer("fine question")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::GuardrailBlocked { .. }));

        // The model did run before the output check tripped.
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        // No link-derivation retrieval after the rejection.
        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_model_output_is_internal_error() {
        let filter = Arc::new(MockFilter::passing());
        let index = Arc::new(MockIndex::with_items(docs()));
        let model = Arc::new(MockModel::replying("I forgot the tags"));

        let err = pipeline(filter, index, model)
            .answer("q")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let filter = Arc::new(MockFilter::passing());
        let index = Arc::new(MockIndex::with_items(vec![]));
        let model = Arc::new(MockModel::replying("<answer>\n  spaced out \n</answer>"));

        let answer = pipeline(filter, index, model).answer("q").await.unwrap();
        assert_eq!(answer.answer, "spaced out");
        assert!(answer.relevant_links.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_documents_deduplicate_links() {
        let mut items = docs();
        items.push(items[0].clone());
        items.push(ResultItem {
            document_id: "s3://bucket/unmapped/doc.md".to_string(),
            content: "no link for this one".to_string(),
        });

        let filter = Arc::new(MockFilter::passing());
        let index = Arc::new(MockIndex::with_items(items));
        let model = Arc::new(MockModel::replying("<answer>ok</answer>"));

        let answer = pipeline(filter, index, model).answer("q").await.unwrap();
        assert_eq!(answer.relevant_links.len(), 2);
    }

    #[tokio::test]
    async fn test_collaborator_fault_propagates() {
        let filter = Arc::new(MockFilter::passing());
        let index = Arc::new(MockIndex::failing("index unavailable"));
        let model = Arc::new(MockModel::replying("<answer>unused</answer>"));

        let err = pipeline(filter, index, model.clone())
            .answer("q")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Retrieval(_)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }
}
