//! Environment settings for the template suite.
//!
//! | variable | meaning |
//! |----------|---------|
//! | `PROBE_BASE_URL` | base URL; the template suite is skipped when unset |
//! | `PROBE_AUTH_TOKEN` | bearer token sent with every request |
//! | `PROBE_TIMEOUT_SECS` | per-case timeout, default 30 |

use std::time::Duration;

use probe_domain::DEFAULT_TIMEOUT;
use thiserror::Error;

/// Base URL variable.
pub const BASE_URL_VAR: &str = "PROBE_BASE_URL";
/// Bearer token variable.
pub const AUTH_TOKEN_VAR: &str = "PROBE_AUTH_TOKEN";
/// Timeout variable, in whole seconds.
pub const TIMEOUT_VAR: &str = "PROBE_TIMEOUT_SECS";

/// Settings errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The timeout is not a positive integer.
    #[error("{TIMEOUT_VAR} must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Settings of the template suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the API under test.
    pub base_url: String,
    /// Optional bearer token.
    pub auth_token: Option<String>,
    /// Per-case timeout.
    pub timeout: Duration,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_lookup`].
    pub fn from_env() -> Result<Option<Self>, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`. Returns `Ok(None)` when no base URL
    /// is configured. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTimeout` when the timeout is not a
    /// positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let Some(base_url) = value(BASE_URL_VAR) else {
            return Ok(None);
        };

        let timeout = match value(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(SettingsError::InvalidTimeout(raw)),
            },
        };

        Ok(Some(Self {
            base_url: base_url.trim().to_string(),
            auth_token: value(AUTH_TOKEN_VAR),
            timeout,
        }))
    }
}
