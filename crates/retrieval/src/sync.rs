//! Index data-source sync jobs: start, look up, and wait for completion.
//!
//! The wait loop polls job status every 15 seconds. Job history lookups are
//! bounded to a 3-hour start-time window, which covers roughly 36k indexed
//! documents; widen the window if sync runs grow longer than that.

use askdocs_core::{AppError, AppResult};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Interval between status polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// How far back job history is searched.
pub const HISTORY_LOOKBACK_HOURS: i64 = 3;

/// Status of a data-source sync job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncJobStatus {
    Syncing,
    Stopping,
    SyncingIndexing,
    Succeeded,
    Failed,
    Aborted,
    Incomplete,
}

impl SyncJobStatus {
    /// Whether the job is still running.
    pub fn in_progress(&self) -> bool {
        matches!(
            self,
            SyncJobStatus::Syncing | SyncJobStatus::Stopping | SyncJobStatus::SyncingIndexing
        )
    }
}

/// One entry from the sync-job history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncJob {
    pub execution_id: String,
    pub status: SyncJobStatus,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Start-time window for history lookups.
#[derive(Debug, Clone)]
pub struct TimeFilter {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeFilter {
    /// Window covering the last `hours` hours, ending now.
    pub fn lookback(hours: i64) -> Self {
        let end_time = Utc::now();
        Self {
            start_time: end_time - ChronoDuration::hours(hours),
            end_time,
        }
    }
}

/// One page of sync-job history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncJobPage {
    #[serde(default)]
    pub history: Vec<SyncJob>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Trait for the index's data-source sync API.
#[async_trait::async_trait]
pub trait SyncJobApi: Send + Sync {
    /// Start a sync job and return its execution id.
    async fn start_sync_job(&self, data_source_id: &str) -> AppResult<String>;

    /// List one page of sync-job history within a time window.
    async fn list_sync_jobs(
        &self,
        data_source_id: &str,
        filter: &TimeFilter,
        next_token: Option<&str>,
    ) -> AppResult<SyncJobPage>;
}

/// Find a sync job by execution id within the lookback window.
///
/// Pages through history until the job is found or the history is exhausted.
pub async fn find_sync_job(
    api: &dyn SyncJobApi,
    data_source_id: &str,
    execution_id: &str,
) -> AppResult<SyncJob> {
    let filter = TimeFilter::lookback(HISTORY_LOOKBACK_HOURS);
    let mut page = api.list_sync_jobs(data_source_id, &filter, None).await?;

    loop {
        if let Some(job) = page
            .history
            .iter()
            .find(|job| job.execution_id == execution_id)
        {
            return Ok(job.clone());
        }

        match page.next_token {
            Some(token) => {
                page = api
                    .list_sync_jobs(data_source_id, &filter, Some(&token))
                    .await?;
            }
            None => break,
        }
    }

    Err(AppError::Sync(format!(
        "Could not find sync job with execution ID {}",
        execution_id
    )))
}

/// Poll a sync job until it reaches a terminal status.
///
/// `SUCCEEDED` resolves to `Ok`; `FAILED` carries the service's error
/// message; any other terminal status is an unexpected failure.
pub async fn wait_for_sync_job(
    api: &dyn SyncJobApi,
    data_source_id: &str,
    execution_id: &str,
) -> AppResult<()> {
    loop {
        let job = find_sync_job(api, data_source_id, execution_id).await?;

        if !job.status.in_progress() {
            tracing::info!(status = ?job.status, "Sync job has finished");
            return match job.status {
                SyncJobStatus::Succeeded => Ok(()),
                SyncJobStatus::Failed => Err(AppError::Sync(format!(
                    "Data source sync job has failed with error message {}",
                    job.error_message.unwrap_or_default()
                ))),
                other => Err(AppError::Sync(format!(
                    "Data source sync job did not succeed, latest status was {:?}",
                    other
                ))),
            };
        }

        tracing::info!(status = ?job.status, "Sync job hasn't finished yet. Sleeping.");
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted sync API: serves one status per poll, in order.
    struct ScriptedApi {
        statuses: Mutex<Vec<SyncJobStatus>>,
        polls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(statuses: Vec<SyncJobStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                polls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl SyncJobApi for ScriptedApi {
        async fn start_sync_job(&self, _data_source_id: &str) -> AppResult<String> {
            Ok("exec-1".to_string())
        }

        async fn list_sync_jobs(
            &self,
            _data_source_id: &str,
            _filter: &TimeFilter,
            _next_token: Option<&str>,
        ) -> AppResult<SyncJobPage> {
            let index = self.polls.fetch_add(1, Ordering::SeqCst);
            let statuses = self.statuses.lock().unwrap();
            let status = statuses[index.min(statuses.len() - 1)];
            Ok(SyncJobPage {
                history: vec![SyncJob {
                    execution_id: "exec-1".to_string(),
                    status,
                    error_message: match status {
                        SyncJobStatus::Failed => Some("quota exceeded".to_string()),
                        _ => None,
                    },
                }],
                next_token: None,
            })
        }
    }

    #[test]
    fn test_in_progress_statuses() {
        assert!(SyncJobStatus::Syncing.in_progress());
        assert!(SyncJobStatus::Stopping.in_progress());
        assert!(SyncJobStatus::SyncingIndexing.in_progress());
        assert!(!SyncJobStatus::Succeeded.in_progress());
        assert!(!SyncJobStatus::Failed.in_progress());
        assert!(!SyncJobStatus::Aborted.in_progress());
    }

    #[test]
    fn test_status_wire_format() {
        let job: SyncJob = serde_json::from_str(
            r#"{"ExecutionId":"e-1","Status":"SYNCING_INDEXING"}"#,
        )
        .unwrap();
        assert_eq!(job.status, SyncJobStatus::SyncingIndexing);
        assert_eq!(job.error_message, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_polls_until_success() {
        let api = ScriptedApi::new(vec![
            SyncJobStatus::Syncing,
            SyncJobStatus::SyncingIndexing,
            SyncJobStatus::Succeeded,
        ]);
        wait_for_sync_job(&api, "ds-1", "exec-1").await.unwrap();
        assert_eq!(api.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_surfaces_failure_message() {
        let api = ScriptedApi::new(vec![SyncJobStatus::Syncing, SyncJobStatus::Failed]);
        let err = wait_for_sync_job(&api, "ds-1", "exec-1").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_treats_aborted_as_unexpected() {
        let api = ScriptedApi::new(vec![SyncJobStatus::Aborted]);
        let err = wait_for_sync_job(&api, "ds-1", "exec-1").await.unwrap_err();
        assert!(err.to_string().contains("did not succeed"));
        assert!(err.to_string().contains("Aborted"));
    }

    #[tokio::test]
    async fn test_find_paginates_history() {
        /// Two pages: the job only appears on the second.
        struct PagedApi;

        #[async_trait::async_trait]
        impl SyncJobApi for PagedApi {
            async fn start_sync_job(&self, _data_source_id: &str) -> AppResult<String> {
                unreachable!()
            }

            async fn list_sync_jobs(
                &self,
                _data_source_id: &str,
                _filter: &TimeFilter,
                next_token: Option<&str>,
            ) -> AppResult<SyncJobPage> {
                match next_token {
                    None => Ok(SyncJobPage {
                        history: vec![SyncJob {
                            execution_id: "other".to_string(),
                            status: SyncJobStatus::Succeeded,
                            error_message: None,
                        }],
                        next_token: Some("page-2".to_string()),
                    }),
                    Some("page-2") => Ok(SyncJobPage {
                        history: vec![SyncJob {
                            execution_id: "exec-9".to_string(),
                            status: SyncJobStatus::Succeeded,
                            error_message: None,
                        }],
                        next_token: None,
                    }),
                    Some(token) => Err(AppError::Sync(format!("unexpected token {}", token))),
                }
            }
        }

        let job = find_sync_job(&PagedApi, "ds-1", "exec-9").await.unwrap();
        assert_eq!(job.status, SyncJobStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_find_missing_job_is_error() {
        struct EmptyApi;

        #[async_trait::async_trait]
        impl SyncJobApi for EmptyApi {
            async fn start_sync_job(&self, _data_source_id: &str) -> AppResult<String> {
                unreachable!()
            }

            async fn list_sync_jobs(
                &self,
                _data_source_id: &str,
                _filter: &TimeFilter,
                _next_token: Option<&str>,
            ) -> AppResult<SyncJobPage> {
                Ok(SyncJobPage {
                    history: vec![],
                    next_token: None,
                })
            }
        }

        let err = find_sync_job(&EmptyApi, "ds-1", "exec-404")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exec-404"));
    }
}
