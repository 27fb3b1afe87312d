//! Resolved request type

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod};

/// A fully resolved request, ready to hand to an HTTP client.
///
/// Produced by [`RequestBuilder::build`](super::RequestBuilder::build):
/// the URL is absolute, default headers are merged and the body is
/// already serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL, including any query string
    pub url: String,
    /// Headers to send
    #[serde(default)]
    pub headers: Headers,
    /// Serialized JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Transport timeout for this request
    pub timeout: Duration,
}

impl RequestSpec {
    /// Returns true when the request carries a body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }
}
