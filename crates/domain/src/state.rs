//! Case lifecycle.
//!
//! Every case moves `Pending → Running → {Passed, Failed, Errored}`.
//! Terminal states never change again.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Lifecycle status of a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Request in flight or assertions being evaluated.
    Running,
    /// Executed and every assertion held.
    Passed,
    /// Executed but an assertion or prerequisite did not hold.
    Failed,
    /// Could not be executed: construction or transport error.
    Errored,
}

impl CaseStatus {
    /// Returns true for `Passed`, `Failed` and `Errored`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Errored)
    }

    /// Returns true if `next` is a legal successor of `self`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Running, Self::Passed | Self::Failed | Self::Errored)
        )
    }

    /// Moves to `next`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` for any move the lifecycle
    /// does not allow, including any move out of a terminal state.
    pub fn transition(&mut self, next: Self) -> DomainResult<()> {
        if !self.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            });
        }
        *self = next;
        Ok(())
    }

    /// Short label used in report lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Errored => "ERROR",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Errored => "errored",
        };
        f.write_str(name)
    }
}
