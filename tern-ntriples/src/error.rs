//! Error types for the N-Triples codec.

use thiserror::Error;

/// Errors raised while encoding or decoding N-Triples text.
///
/// Positions are byte offsets into the input the failing call received
/// (the term text for term-level errors, the line for statement-level
/// errors).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NtriplesError {
    /// Malformed lexical text: unterminated literal, bad delimiters, or a
    /// term kind not allowed in its position.
    #[error("invalid term at byte {position}: {message}")]
    InvalidTerm { position: usize, message: String },

    /// Malformed escape sequence: dangling backslash, truncated or
    /// non-hex `\u`/`\U`, unknown escape letter, or an invalid code point.
    #[error("invalid escape sequence at byte {position}: {message}")]
    Escape { position: usize, message: String },

    /// A statement line that does not hold exactly three terms and an
    /// optional terminating `.`.
    #[error("invalid statement at byte {position}: {message}")]
    InvalidStatement { position: usize, message: String },
}

impl NtriplesError {
    /// Create an `InvalidTerm` error.
    pub fn invalid_term(position: usize, message: impl Into<String>) -> Self {
        NtriplesError::InvalidTerm {
            position,
            message: message.into(),
        }
    }

    /// Create an `Escape` error.
    pub fn escape(position: usize, message: impl Into<String>) -> Self {
        NtriplesError::Escape {
            position,
            message: message.into(),
        }
    }

    /// Create an `InvalidStatement` error.
    pub fn invalid_statement(position: usize, message: impl Into<String>) -> Self {
        NtriplesError::InvalidStatement {
            position,
            message: message.into(),
        }
    }

    /// Byte offset the error was raised at.
    pub fn position(&self) -> usize {
        match self {
            NtriplesError::InvalidTerm { position, .. }
            | NtriplesError::Escape { position, .. }
            | NtriplesError::InvalidStatement { position, .. } => *position,
        }
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, NtriplesError>;
