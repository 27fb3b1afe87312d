//! HTTP request body types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Content type sent with every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A JSON request body.
///
/// Cases either provide a structured value or a pre-serialized JSON
/// string. Raw strings are validated when the request is built so that
/// malformed payloads never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// Structured JSON value.
    Json(serde_json::Value),
    /// Pre-serialized JSON text, sent byte-for-byte.
    Raw(String),
}

impl RequestBody {
    /// Creates a body from a structured JSON value.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Creates a body from JSON text.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw(content.into())
    }

    /// Serializes the body into the payload that goes on the wire.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` when a raw body is not valid JSON
    /// or a structured value cannot be serialized.
    pub fn to_payload(&self) -> DomainResult<String> {
        match self {
            Self::Json(value) => serde_json::to_string(value)
                .map_err(|e| DomainError::InvalidBody(e.to_string())),
            Self::Raw(content) => {
                serde_json::from_str::<serde_json::Value>(content)
                    .map_err(|e| DomainError::InvalidBody(format!("Invalid JSON: {e}")))?;
                Ok(content.clone())
            }
        }
    }
}
