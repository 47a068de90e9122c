//! Wire-level error envelope.

use serde::{Deserialize, Serialize};

/// Machine-readable error codes carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed or used an unsupported parameter.
    InvalidRequest,

    /// The request's protocol version does not match the server's.
    UnsupportedProtocolVersion,

    /// The target index does not exist.
    IndexNotFound,

    /// The scroll context expired before the continuation arrived.
    ScrollExpired,

    /// The operation exceeded its time budget.
    Timeout,

    /// Unexpected server-side failure.
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::UnsupportedProtocolVersion => "unsupported_protocol_version",
            ErrorCode::IndexNotFound => "index_not_found",
            ErrorCode::ScrollExpired => "scroll_expired",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

/// Error response envelope.
///
/// Returned with a non-2xx status by every endpoint. Mirrors the
/// success envelopes: protocol version first, request ID echoed when
/// the client sent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchError {
    /// Protocol version of the server.
    pub protocol_version: String,

    /// Request ID (echoed from request if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// The error itself.
    pub error: ErrorDetail,
}

impl SearchError {
    /// Create a new error envelope.
    pub fn new(
        protocol_version: impl Into<String>,
        request_id: Option<String>,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            protocol_version: protocol_version.into(),
            request_id,
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error.code, self.error.message)
    }
}

impl std::error::Error for SearchError {}
