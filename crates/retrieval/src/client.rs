//! Search index abstraction and retrieval result types.

use askdocs_core::AppResult;
use serde::{Deserialize, Serialize};

/// Fixed page size for every retrieval; only the first page is requested.
pub const PAGE_SIZE: u32 = 5;

/// A single result item from the search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// Opaque document identifier (in practice an object-storage path)
    pub document_id: String,

    /// Text snippet for the document
    pub content: String,
}

/// Ordered search results for one query.
///
/// Lives only for the duration of a request; consumed immediately by prompt
/// rendering or link derivation.
#[derive(Debug, Clone, Default)]
pub struct RetrievedContext {
    pub items: Vec<ResultItem>,
}

impl RetrievedContext {
    pub fn new(items: Vec<ResultItem>) -> Self {
        Self { items }
    }

    /// Document identifiers, in result order.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.document_id.as_str())
    }

    /// Snippet texts joined with newlines, preserving result order.
    pub fn concatenated(&self) -> String {
        self.items
            .iter()
            .map(|item| item.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for the managed search index service.
#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    /// Retrieve the first page of results for a free-text query.
    async fn retrieve(&self, query: &str) -> AppResult<RetrievedContext>;
}
