//! Search backend abstraction.
//!
//! A backend is whatever executes filter queries over the triple index:
//! a remote document-search engine reached over HTTP, or the in-memory
//! engine used in tests. Read and write halves are separate traits so
//! query-only callers do not see indexing operations.

use async_trait::async_trait;
use tern_search_protocol::{
    BulkRequest, CountRequest, CreateIndexRequest, RefreshRequest, ScrollRequest, SearchPage,
    SearchRequest,
};

use crate::error::Result;

mod memory;
mod remote;

pub use memory::MemoryBackend;
pub use remote::RemoteBackend;

/// Read half: scrolling search and counting.
#[async_trait]
pub trait SearchBackend: std::fmt::Debug + Send + Sync {
    /// Open a scrolling pass and return its first page.
    ///
    /// The page carries a continuation token whenever the engine kept
    /// the scroll context alive; pass it to [`scroll`](Self::scroll)
    /// for the next page.
    async fn search(&self, request: SearchRequest) -> Result<SearchPage>;

    /// Fetch the next page of an open scrolling pass.
    ///
    /// Fails with `ServiceError::ScrollExpired` when the keep-alive
    /// window lapsed between pages.
    async fn scroll(&self, request: ScrollRequest) -> Result<SearchPage>;

    /// Count documents matching a query without fetching them.
    async fn count(&self, request: CountRequest) -> Result<u64>;
}

/// Write half: bulk indexing and index administration.
#[async_trait]
pub trait DocumentSink: std::fmt::Debug + Send + Sync {
    /// Index a batch of documents. Returns the number accepted.
    async fn bulk(&self, request: BulkRequest) -> Result<u64>;

    /// Create an index. Returns `false` when it already existed.
    async fn create_index(&self, request: CreateIndexRequest) -> Result<bool>;

    /// Make all indexed documents visible to subsequent searches.
    async fn refresh(&self, request: RefreshRequest) -> Result<()>;
}
