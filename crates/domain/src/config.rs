//! Suite configuration.
//!
//! A [`SuiteConfig`] is assembled once before a suite starts and handed to
//! the runner by value; nothing mutates it afterwards.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::{Header, Headers};

/// Per-case timeout applied when a case does not set its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide settings shared by every case of a suite.
///
/// Only [`SuiteConfig::new`] creates one, so the base URI is always
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteConfig {
    base_uri: String,
    default_headers: Headers,
    default_timeout: Duration,
}

impl SuiteConfig {
    /// Creates a configuration rooted at `base_uri`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` unless the base is an absolute
    /// `http` or `https` URL without a query or fragment.
    pub fn new(base_uri: impl Into<String>) -> DomainResult<Self> {
        let base_uri = base_uri.into();
        let parsed =
            Url::parse(&base_uri).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_uri}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {base_uri}",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(DomainError::InvalidUrl(format!(
                "base URI must not carry a query or fragment: {base_uri}"
            )));
        }

        Ok(Self {
            base_uri,
            default_headers: Headers::new(),
            default_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.set(Header::new(name, value));
        self
    }

    /// Adds an `Authorization: Bearer` header sent with every request.
    #[must_use]
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.with_header("Authorization", value)
    }

    /// Overrides the default per-case timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// The base URI relative paths are joined onto.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Headers merged into every request.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Timeout used by cases that do not declare one.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}
