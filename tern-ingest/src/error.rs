//! Ingestion error types.

use tern_ntriples::NtriplesError;
use tern_search_service::ServiceError;
use thiserror::Error;

/// Errors raised while loading triples into the index.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A statement line did not parse.
    #[error("parse error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: NtriplesError,
    },

    /// The search backend rejected an operation.
    #[error("backend error: {source}")]
    Backend {
        #[from]
        source: ServiceError,
    },

    /// Input could not be read.
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
