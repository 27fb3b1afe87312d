//! Response specification type
//!
//! What the executor hands back to the evaluator: status, headers, the raw
//! body and, for JSON content types, the parsed document.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::Headers;

/// HTTP response received for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers.
    #[serde(default)]
    pub headers: Headers,
    /// Response body as (lossy) UTF-8 text.
    pub body: String,
    /// Parsed body, present when the content type is JSON and parsing
    /// succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<serde_json::Value>,
    /// Response time.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// Response size in bytes.
    pub size: usize,
}

impl ResponseSpec {
    /// Creates a response from raw transport data.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: Vec<u8>, duration: Duration) -> Self {
        let size = body.len();
        let body = String::from_utf8(body)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

        let json = headers
            .get("content-type")
            .filter(|ct| ct.contains("json"))
            .and_then(|_| serde_json::from_str(&body).ok());

        Self {
            status,
            status_text: reason_phrase(status).to_string(),
            headers,
            body,
            json,
            duration,
            size,
        }
    }

    /// Returns the parsed JSON body, parsing the raw text when the content
    /// type did not announce JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.json
            .clone()
            .or_else(|| serde_json::from_str(&self.body).ok())
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: Headers::new(),
            body: String::new(),
            json: None,
            duration: Duration::ZERO,
            size: 0,
        }
    }
}

/// Canonical reason phrase for the status codes contract suites meet.
const fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        415 => "Unsupported Media Type",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
