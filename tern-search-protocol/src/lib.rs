//! Wire protocol between the graph adapter and its search backend.
//!
//! The adapter never speaks a specific engine's API; it speaks these JSON
//! envelopes. Any document-search service that can answer them (boolean
//! field-equality filters, scroll pagination with a continuation token,
//! match-all counts, and bulk indexing) can host the adapter.
//!
//! The crate also owns the indexed document schema: the field names
//! ([`fields`]), the document shape ([`Document`]), and the index mapping
//! ([`index_mapping`]) provisioned at index creation.

pub mod document;
pub mod error;
pub mod fields;
pub mod mapping;
pub mod query;
pub mod request;
pub mod response;

pub use document::Document;
pub use error::{ErrorCode, ErrorDetail, SearchError};
pub use mapping::index_mapping;
pub use query::{ClauseValue, FilterQuery, TermClause};
pub use request::{
    BulkRequest, CountRequest, CreateIndexRequest, RefreshRequest, ScrollRequest, SearchRequest,
};
pub use response::{BulkResponse, CountResponse, CreateIndexResponse, RefreshResponse, SearchPage};

/// Protocol version for compatibility checking.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Default number of documents per scroll page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Maximum allowed scroll page size.
pub const MAX_PAGE_SIZE: usize = 10_000;

/// Default scroll keep-alive in milliseconds.
///
/// The continuation token expires if the next page is not requested
/// within this window.
pub const DEFAULT_KEEP_ALIVE_MS: u64 = 5_000;

/// Maximum allowed scroll keep-alive in milliseconds (5 minutes).
pub const MAX_KEEP_ALIVE_MS: u64 = 300_000;
