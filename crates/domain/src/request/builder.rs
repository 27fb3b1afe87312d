//! Request builder.
//!
//! Accumulates the pieces of a case's request and resolves them against a
//! [`SuiteConfig`] in a single [`RequestBuilder::build`] call.

use std::time::Duration;

use url::Url;

use super::{Header, Headers, HttpMethod, JSON_CONTENT_TYPE, RequestBody, RequestSpec};
use crate::config::SuiteConfig;
use crate::error::{DomainError, DomainResult};

/// Builder for a single outbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBuilder {
    method: HttpMethod,
    path: String,
    headers: Headers,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Starts a request with the given method and path.
    ///
    /// The path is either relative to the suite's base URI or an absolute
    /// `http(s)://` URL.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Starts a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Starts a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Starts a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Starts a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets a header, overriding any suite default with the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(Header::new(name, value));
        self
    }

    /// Appends a query parameter. Parameters are form-encoded; a query
    /// already present in the path is left untouched.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a structured JSON body.
    #[must_use]
    pub fn json(self, value: serde_json::Value) -> Self {
        self.body(RequestBody::Json(value))
    }

    /// Overrides the suite's default timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// The unresolved path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a copy of this builder with a different path.
    #[must_use]
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self.clone()
        }
    }

    /// Resolves the request against the suite configuration.
    ///
    /// # Errors
    ///
    /// Fails before any network activity when the path or resolved URL is
    /// malformed, a header is invalid, the query cannot be encoded or the
    /// body is not valid JSON.
    pub fn build(&self, config: &SuiteConfig) -> DomainResult<RequestSpec> {
        let mut url = join_url(config.base_uri(), &self.path)?;

        if !self.query.is_empty() {
            let encoded = serde_urlencoded::to_string(&self.query)
                .map_err(|e| DomainError::InvalidQuery(e.to_string()))?;
            if !url.contains('?') {
                url.push('?');
            } else if !url.ends_with('?') && !url.ends_with('&') {
                url.push('&');
            }
            url.push_str(&encoded);
        }

        Url::parse(&url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))?;

        let mut headers = config.default_headers().merged_with(&self.headers);
        for header in headers.iter() {
            header.validate()?;
        }

        let body = self.body.as_ref().map(RequestBody::to_payload).transpose()?;
        if body.is_some() && !headers.contains("content-type") {
            headers.set(Header::new("Content-Type", JSON_CONTENT_TYPE));
        }

        Ok(RequestSpec {
            method: self.method,
            url,
            headers,
            body,
            timeout: self.timeout.unwrap_or_else(|| config.default_timeout()),
        })
    }
}

/// Joins a request path onto a base URI.
///
/// Exactly one `/` separates the two. Absolute `http(s)://` paths replace
/// the base, and a literal query string in the path is kept verbatim.
///
/// # Errors
///
/// Returns `DomainError::InvalidPath` when the path is empty or contains
/// whitespace or control characters.
pub fn join_url(base: &str, path: &str) -> DomainResult<String> {
    if path.is_empty() || path.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(DomainError::InvalidPath(path.to_string()));
    }

    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(path.to_string());
    }

    let base = base.trim_end_matches('/');
    if path.starts_with('?') {
        return Ok(format!("{base}{path}"));
    }

    Ok(format!("{base}/{}", path.trim_start_matches('/')))
}
