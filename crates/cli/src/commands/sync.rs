//! Sync command handler.
//!
//! Mirrors the two infrastructure actions around index ingestion: start a
//! data-source sync job, then poll its status until it reaches a terminal
//! state.

use askdocs_core::{AppError, AppResult, ServiceConfig};
use askdocs_retrieval::sync::{wait_for_sync_job, SyncJobApi};
use askdocs_retrieval::KendraClient;
use clap::Args;
use std::time::Duration;

/// Outbound request timeout, matching the server's collaborator clients.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Start an index data-source sync job and wait for it
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Data source to synchronize
    #[arg(long, env = "DATA_SOURCE_ID")]
    pub data_source_id: String,

    /// Wait on an existing job instead of starting a new one
    #[arg(long)]
    pub execution_id: Option<String>,

    /// Start the job without waiting for completion
    #[arg(long)]
    pub no_wait: bool,
}

impl SyncCommand {
    /// Execute the sync command.
    pub async fn execute(&self, config: &ServiceConfig) -> AppResult<()> {
        let api = KendraClient::new(
            http_client()?,
            config.retrieval_endpoint.clone(),
            config.search_index_id.clone(),
        );

        let execution_id = match &self.execution_id {
            Some(id) => id.clone(),
            None => api.start_sync_job(&self.data_source_id).await?,
        };

        println!("{}", execution_id);

        if self.no_wait {
            return Ok(());
        }

        wait_for_sync_job(&api, &self.data_source_id, &execution_id).await
    }
}

fn http_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))
}
