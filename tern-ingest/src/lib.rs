//! Bulk N-Triples ingestion into a search index.
//!
//! Parses one-statement-per-line triple data, maps each triple to its
//! indexed document form, and ships the documents to a
//! [`DocumentSink`](tern_search_service::DocumentSink) in batches. The
//! `tern-ingest` binary wraps this around a remote backend; the HTTP
//! server reuses it for uploads.

pub mod error;
pub mod loader;

pub use error::{IngestError, Result};
pub use loader::{BulkLoader, IngestStats};

/// Default documents per bulk batch.
pub const DEFAULT_MAX_ACTIONS: usize = 10_000;
