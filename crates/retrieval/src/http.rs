//! Managed search index client.
//!
//! The index speaks a target-header JSON protocol: every call is a `POST /`
//! with an `X-Amz-Target` header naming the operation and a PascalCase JSON
//! body. Timestamps go over the wire as epoch seconds.

use crate::client::{ResultItem, RetrievedContext, SearchIndex, PAGE_SIZE};
use crate::sync::{SyncJobApi, SyncJobPage, TimeFilter};
use askdocs_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

const TARGET_PREFIX: &str = "AWSKendraFrontendService";

/// Retrieve response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RetrieveResponse {
    #[serde(default)]
    result_items: Vec<RetrieveResultItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RetrieveResultItem {
    document_id: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StartSyncJobResponse {
    execution_id: String,
}

/// Client for the managed search index service.
pub struct KendraClient {
    base_url: String,
    index_id: String,
    client: reqwest::Client,
}

impl KendraClient {
    /// Create a client with a shared HTTP handle.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        index_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            index_id: index_id.into(),
            client,
        }
    }

    /// Issue one operation against the index service.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: serde_json::Value,
    ) -> AppResult<T> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "application/x-amz-json-1.1")
            .header("X-Amz-Target", format!("{}.{}", TARGET_PREFIX, operation))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Retrieval(format!("Failed to reach search index: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Retrieval(format!(
                "Search index error for {} ({}): {}",
                operation, status, error_text
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}

#[async_trait::async_trait]
impl SearchIndex for KendraClient {
    async fn retrieve(&self, query: &str) -> AppResult<RetrievedContext> {
        tracing::debug!(index = %self.index_id, "Retrieving context");

        let response: RetrieveResponse = self
            .call(
                "Retrieve",
                json!({
                    "IndexId": self.index_id,
                    "QueryText": query,
                    "PageNumber": 1,
                    "PageSize": PAGE_SIZE,
                }),
            )
            .await?;

        let items = response
            .result_items
            .into_iter()
            .map(|item| ResultItem {
                document_id: item.document_id,
                content: item.content,
            })
            .collect();

        Ok(RetrievedContext::new(items))
    }
}

#[async_trait::async_trait]
impl SyncJobApi for KendraClient {
    async fn start_sync_job(&self, data_source_id: &str) -> AppResult<String> {
        let response: StartSyncJobResponse = self
            .call(
                "StartDataSourceSyncJob",
                json!({
                    "Id": data_source_id,
                    "IndexId": self.index_id,
                }),
            )
            .await?;

        tracing::info!(execution_id = %response.execution_id, "Started data source sync job");
        Ok(response.execution_id)
    }

    async fn list_sync_jobs(
        &self,
        data_source_id: &str,
        filter: &TimeFilter,
        next_token: Option<&str>,
    ) -> AppResult<SyncJobPage> {
        let mut body = json!({
            "Id": data_source_id,
            "IndexId": self.index_id,
            "StartTimeFilter": {
                "StartTime": filter.start_time.timestamp(),
                "EndTime": filter.end_time.timestamp(),
            },
        });
        if let Some(token) = next_token {
            body["NextToken"] = json!(token);
        }

        self.call("ListDataSourceSyncJobs", body).await
    }
}
