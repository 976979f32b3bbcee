//! Search index integration for the askdocs service.
//!
//! Covers three concerns around the managed search index:
//! - querying it for snippets relevant to a question (`SearchIndex`)
//! - deriving public documentation URLs from retrieved document ids
//! - starting and polling index data-source sync jobs

pub mod client;
pub mod http;
pub mod links;
pub mod sync;

pub use client::{ResultItem, RetrievedContext, SearchIndex, PAGE_SIZE};
pub use http::KendraClient;
pub use links::link_for_document;
pub use sync::{wait_for_sync_job, SyncJob, SyncJobApi, SyncJobPage, SyncJobStatus, TimeFilter};
