//! Graph-level error types.

use tern_ntriples::NtriplesError;
use tern_search_service::ServiceError;
use thiserror::Error;

/// Errors surfaced by the graph facade.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Pattern violates the translation contract (literal subject,
    /// non-IRI predicate or graph term).
    #[error("cannot translate pattern: {message}")]
    Translate { message: String },

    /// Named graph handle was constructed with an unusable IRI.
    #[error("invalid graph name: {message}")]
    InvalidGraph { message: String },

    /// A backend fetch failed; the cursor that raised this is finished.
    #[error("backend fetch failed: {source}")]
    Fetch {
        #[from]
        source: ServiceError,
    },

    /// A stored document could not be decoded back into a triple.
    #[error("cannot decode indexed document: {source}")]
    Decode {
        #[from]
        source: NtriplesError,
    },
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
