//! Request envelopes.

use serde::{Deserialize, Serialize};

use crate::{Document, FilterQuery, DEFAULT_PAGE_SIZE};

/// Search request envelope for the `/v1/search` endpoint.
///
/// Opens a scrolling pass over every document matching `query`. The
/// response carries the first page plus a continuation token; follow-up
/// pages go through [`ScrollRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Protocol version (must match server's supported version).
    pub protocol_version: String,

    /// Optional client-provided request ID for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Target index name.
    pub index: String,

    /// Conjunction of field-equality clauses; empty matches everything.
    #[serde(default)]
    pub query: FilterQuery,

    /// Maximum hits per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How long the server keeps the scroll context alive between
    /// pages, in milliseconds. `None` uses the server default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive_ms: Option<u64>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl SearchRequest {
    /// Create a search request with the default page size.
    pub fn new(index: impl Into<String>, query: FilterQuery) -> Self {
        Self {
            protocol_version: crate::PROTOCOL_VERSION.to_string(),
            request_id: None,
            index: index.into(),
            query,
            page_size: DEFAULT_PAGE_SIZE,
            keep_alive_ms: None,
        }
    }

    /// Set the request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the scroll keep-alive.
    pub fn with_keep_alive_ms(mut self, keep_alive_ms: u64) -> Self {
        self.keep_alive_ms = Some(keep_alive_ms);
        self
    }
}

/// Continuation request for the `/v1/scroll` endpoint.
///
/// `scroll_id` is the token from the previous [`SearchPage`]. Each page
/// renews the keep-alive window.
///
/// [`SearchPage`]: crate::SearchPage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollRequest {
    /// Protocol version (must match server's supported version).
    pub protocol_version: String,

    /// Continuation token from the previous page.
    pub scroll_id: String,

    /// Keep-alive renewal in milliseconds. `None` uses the server default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive_ms: Option<u64>,
}

impl ScrollRequest {
    pub fn new(scroll_id: impl Into<String>) -> Self {
        Self {
            protocol_version: crate::PROTOCOL_VERSION.to_string(),
            scroll_id: scroll_id.into(),
            keep_alive_ms: None,
        }
    }

    /// Set the keep-alive renewal.
    pub fn with_keep_alive_ms(mut self, keep_alive_ms: u64) -> Self {
        self.keep_alive_ms = Some(keep_alive_ms);
        self
    }
}

/// Count request envelope for the `/v1/count` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountRequest {
    /// Protocol version (must match server's supported version).
    pub protocol_version: String,

    /// Target index name.
    pub index: String,

    /// Conjunction of field-equality clauses; empty counts everything.
    #[serde(default)]
    pub query: FilterQuery,
}

impl CountRequest {
    pub fn new(index: impl Into<String>, query: FilterQuery) -> Self {
        Self {
            protocol_version: crate::PROTOCOL_VERSION.to_string(),
            index: index.into(),
            query,
        }
    }
}

/// Bulk indexing request envelope for the `/v1/bulk` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    /// Protocol version (must match server's supported version).
    pub protocol_version: String,

    /// Target index name.
    pub index: String,

    /// Documents to index, in order.
    pub actions: Vec<Document>,
}

impl BulkRequest {
    pub fn new(index: impl Into<String>, actions: Vec<Document>) -> Self {
        Self {
            protocol_version: crate::PROTOCOL_VERSION.to_string(),
            index: index.into(),
            actions,
        }
    }
}

/// Index-creation request envelope for the `/v1/index/create` endpoint.
///
/// Creating an index that already exists is not an error; the server
/// reports `created: false` in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    /// Protocol version (must match server's supported version).
    pub protocol_version: String,

    /// Index name to create.
    pub index: String,

    /// Field mapping to install, as mapping JSON. `None` leaves the
    /// server's default mapping in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<serde_json::Value>,
}

impl CreateIndexRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            protocol_version: crate::PROTOCOL_VERSION.to_string(),
            index: index.into(),
            mapping: None,
        }
    }

    /// Set the field mapping.
    pub fn with_mapping(mut self, mapping: serde_json::Value) -> Self {
        self.mapping = Some(mapping);
        self
    }
}

/// Refresh request envelope for the `/v1/index/refresh` endpoint.
///
/// Makes every document indexed so far visible to subsequent searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Protocol version (must match server's supported version).
    pub protocol_version: String,

    /// Index name to refresh.
    pub index: String,
}

impl RefreshRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            protocol_version: crate::PROTOCOL_VERSION.to_string(),
            index: index.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_serialization() {
        let mut query = FilterQuery::match_all();
        query.push("s", "<http://example.org/alice>");
        let request = SearchRequest::new("triples", query)
            .with_request_id("req-7")
            .with_page_size(500)
            .with_keep_alive_ms(5000);

        let json = serde_json::to_string_pretty(&request).unwrap();
        let parsed: SearchRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.protocol_version, crate::PROTOCOL_VERSION);
        assert_eq!(parsed.request_id.as_deref(), Some("req-7"));
        assert_eq!(parsed.index, "triples");
        assert_eq!(parsed.page_size, 500);
        assert_eq!(parsed.keep_alive_ms, Some(5000));
        assert_eq!(parsed.query.clauses.len(), 1);
    }

    #[test]
    fn test_default_page_size() {
        let json = r#"{
            "protocol_version": "1.0",
            "index": "triples"
        }"#;

        let parsed: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.page_size, DEFAULT_PAGE_SIZE);
        assert!(parsed.query.is_match_all());
        assert!(parsed.keep_alive_ms.is_none());
    }

    #[test]
    fn test_scroll_request_round_trip() {
        let request = ScrollRequest::new("scroll-42").with_keep_alive_ms(5000);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: ScrollRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scroll_id, "scroll-42");
        assert_eq!(parsed.keep_alive_ms, Some(5000));
    }

    #[test]
    fn test_bulk_request_carries_documents() {
        let doc = Document::new("<s>", "<p>", "\"1\"").with_long(1);
        let request = BulkRequest::new("triples", vec![doc.clone()]);
        let json = serde_json::to_string(&request).unwrap();
        let parsed: BulkRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.actions, vec![doc]);
    }

    #[test]
    fn test_create_index_mapping_is_optional() {
        let json = r#"{"protocol_version": "1.0", "index": "triples"}"#;
        let parsed: CreateIndexRequest = serde_json::from_str(json).unwrap();
        assert!(parsed.mapping.is_none());

        let with_mapping = CreateIndexRequest::new("triples")
            .with_mapping(serde_json::json!({ "properties": {} }));
        let round: CreateIndexRequest =
            serde_json::from_str(&serde_json::to_string(&with_mapping).unwrap()).unwrap();
        assert!(round.mapping.is_some());
    }
}
