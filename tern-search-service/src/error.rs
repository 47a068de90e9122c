//! Client-side error types for search backend operations.
//!
//! These errors are what backend implementations surface to callers.
//! Wire-level `SearchError` envelopes from a remote engine are mapped
//! into these variants; `error_code` maps back for callers that speak
//! the protocol themselves.

use tern_search_protocol::ErrorCode;
use thiserror::Error;

/// Errors surfaced by search backends.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid request parameters.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Target index does not exist.
    #[error("index not found: {index}")]
    IndexNotFound { index: String },

    /// Scroll context expired or was never opened.
    #[error("scroll context expired: {scroll_id}")]
    ScrollExpired { scroll_id: String },

    /// Request timeout.
    #[error("request timeout: {message}")]
    Timeout { message: String },

    /// Could not reach the backend at all.
    #[error("connection failed: {message}")]
    Connect { message: String },

    /// The backend answered with an error the protocol does not model.
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Internal error.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    /// Convert to protocol error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ServiceError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            ServiceError::IndexNotFound { .. } => ErrorCode::IndexNotFound,
            ServiceError::ScrollExpired { .. } => ErrorCode::ScrollExpired,
            ServiceError::Timeout { .. } => ErrorCode::Timeout,
            ServiceError::Connect { .. }
            | ServiceError::Backend { .. }
            | ServiceError::Internal { .. } => ErrorCode::Internal,
        }
    }
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
