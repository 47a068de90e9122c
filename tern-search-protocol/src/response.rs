//! Response envelopes.

use serde::{Deserialize, Serialize};

use crate::Document;

/// One page of search hits.
///
/// Returned by both `/v1/search` and `/v1/scroll`. `scroll_id` is the
/// continuation token for the next page; servers may omit it once the
/// pass is exhausted, and a page with fewer hits than the requested
/// page size always means no further page exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    /// Protocol version (echoed from request).
    pub protocol_version: String,

    /// Request ID (echoed from request if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Hits in this page, in index order.
    pub hits: Vec<Document>,

    /// Total number of documents matching the query, across all pages.
    pub total: u64,

    /// Continuation token for the next page, if the server kept the
    /// scroll context alive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,

    /// Time taken to produce this page in milliseconds.
    pub took_ms: u64,
}

impl SearchPage {
    /// Create a page echoing the given protocol version.
    pub fn new(protocol_version: String, hits: Vec<Document>, total: u64, took_ms: u64) -> Self {
        Self {
            protocol_version,
            request_id: None,
            hits,
            total,
            scroll_id: None,
            took_ms,
        }
    }

    /// Attach the continuation token.
    pub fn with_scroll_id(mut self, scroll_id: impl Into<String>) -> Self {
        self.scroll_id = Some(scroll_id.into());
        self
    }

    /// Echo the request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Response for `/v1/count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Protocol version (echoed from request).
    pub protocol_version: String,

    /// Number of documents matching the query.
    pub count: u64,

    /// Time taken in milliseconds.
    pub took_ms: u64,
}

/// Response for `/v1/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Protocol version (echoed from request).
    pub protocol_version: String,

    /// Number of documents accepted into the index.
    pub indexed: u64,

    /// Time taken in milliseconds.
    pub took_ms: u64,
}

/// Response for `/v1/index/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexResponse {
    /// Protocol version (echoed from request).
    pub protocol_version: String,

    /// `true` when the index was created by this request, `false` when
    /// it already existed.
    pub created: bool,
}

/// Response for `/v1/index/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Protocol version (echoed from request).
    pub protocol_version: String,
}
