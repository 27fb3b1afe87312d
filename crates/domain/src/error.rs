//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while constructing requests or evaluating
/// responses, before or without any network activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured base URI or the resolved URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request path cannot be joined onto the base URI.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A header name is invalid.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// A header value is invalid.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(String),

    /// The request body cannot be serialized as JSON.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Query parameters cannot be encoded.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A JSON path expression is malformed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending expression.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A case attempted an illegal lifecycle transition.
    #[error("invalid case transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
