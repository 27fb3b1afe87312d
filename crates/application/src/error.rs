//! Application error types

use probe_domain::{CaseFailure, DomainError};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Errors that stop a case before its assertions run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HarnessError {
    /// The request could not be constructed; nothing was sent.
    #[error("request construction error: {0}")]
    RequestConstruction(#[from] DomainError),

    /// The transport failed; no response to evaluate.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// A fixture this case depends on was never written.
    #[error("missing prerequisite fixture '{0}'")]
    MissingFixture(String),
}

impl HarnessError {
    /// Converts the error into the failure recorded on the case report.
    #[must_use]
    pub fn to_case_failure(&self) -> CaseFailure {
        match self {
            Self::RequestConstruction(e) => CaseFailure::RequestConstruction(e.to_string()),
            Self::Transport(e) => CaseFailure::Transport(e.to_string()),
            Self::MissingFixture(key) => CaseFailure::MissingFixture(key.clone()),
        }
    }
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
