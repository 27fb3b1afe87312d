//! Execute Request Use Case
//!
//! Sends one resolved request through the `HttpClient` port, enforcing the
//! request's timeout regardless of which adapter is plugged in.

use std::sync::Arc;

use probe_domain::{DomainError, request::RequestSpec, response::ResponseSpec};
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};
use crate::ports::{HttpClient, HttpClientError};

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let client = ReqwestHttpClient::new()?;
/// let use_case = ExecuteRequest::new(Arc::new(client));
///
/// let request = RequestBuilder::get("/users/2").build(&config)?;
/// let response = use_case.execute(&request).await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request once and returns the response, whatever its
    /// status.
    ///
    /// # Errors
    ///
    /// `HarnessError::RequestConstruction` when the URL is empty or not
    /// http(s); `HarnessError::Transport` on network failure or when the
    /// request timeout expires.
    pub async fn execute(&self, request: &RequestSpec) -> HarnessResult<ResponseSpec> {
        Self::validate(request)?;

        debug!(method = %request.method, url = %request.url, "sending request");

        let response = tokio::time::timeout(request.timeout, self.client.execute(request))
            .await
            .map_err(|_| HttpClientError::Timeout {
                timeout_ms: u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        debug!(
            status = response.status,
            duration_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        Ok(response)
    }

    fn validate(request: &RequestSpec) -> HarnessResult<()> {
        if request.url.trim().is_empty() {
            return Err(DomainError::InvalidUrl("URL is required".to_string()).into());
        }

        let is_http = request
            .url
            .split_once("://")
            .is_some_and(|(scheme, _)| {
                scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
            });
        if !is_http {
            return Err(HarnessError::RequestConstruction(DomainError::InvalidUrl(
                format!("URL must start with http:// or https://: {}", request.url),
            )));
        }

        Ok(())
    }
}
