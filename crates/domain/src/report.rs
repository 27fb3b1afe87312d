//! Case and suite reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::CaseStatus;

/// Placeholder printed when a path resolved to nothing.
pub const ABSENT: &str = "<absent>";

/// A single expected-vs-actual mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// JSON path that was checked; `None` for the status code.
    pub path: Option<String>,
    /// What was expected.
    pub expected: String,
    /// What was found; `None` when the path resolved to nothing.
    pub actual: Option<String>,
}

impl AssertionFailure {
    /// Mismatch on the status code.
    #[must_use]
    pub fn status(expected: impl Into<String>, actual: u16) -> Self {
        Self {
            path: None,
            expected: expected.into(),
            actual: Some(actual.to_string()),
        }
    }

    /// Mismatch at a JSON path.
    #[must_use]
    pub fn at(path: impl Into<String>, expected: impl Into<String>, actual: Option<String>) -> Self {
        Self {
            path: Some(path.into()),
            expected: expected.into(),
            actual,
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actual = self.actual.as_deref().unwrap_or(ABSENT);
        match &self.path {
            Some(path) => write!(f, "{path}: expected {}, got {actual}", self.expected),
            None => write!(f, "status code: expected {}, got {actual}", self.expected),
        }
    }
}

/// Outcome of one evaluated check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionResult {
    /// What was checked.
    pub description: String,
    /// Whether the check held.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
}

impl AssertionResult {
    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass(description: impl Into<String>, actual: Option<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            actual,
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail(description: impl Into<String>, actual: Option<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            actual,
        }
    }
}

/// Why a case did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CaseFailure {
    /// A status or body assertion did not hold.
    Assertion(AssertionFailure),
    /// A fixture the case depends on was never written.
    MissingFixture(String),
    /// The request could not be constructed.
    RequestConstruction(String),
    /// The transport failed before a response arrived.
    Transport(String),
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assertion(failure) => failure.fmt(f),
            Self::MissingFixture(key) => write!(f, "missing prerequisite fixture '{key}'"),
            Self::RequestConstruction(msg) => write!(f, "request construction error: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

/// Report for one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Declared order, if any.
    pub order: Option<u32>,
    /// Terminal status.
    pub status: CaseStatus,
    /// Failure detail for `Failed` and `Errored` cases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<CaseFailure>,
    /// Checks evaluated, in order, up to and including the first failure.
    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
    /// Wall-clock time spent on the case.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Returns true if the case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<5}] ", self.status.label())?;
        if let Some(order) = self.order {
            write!(f, "{order:>2}. ")?;
        }
        write!(f, "{} ({} ms)", self.name, self.duration_ms)?;
        if let Some(failure) = &self.failure {
            write!(f, ": {failure}")?;
        }
        Ok(())
    }
}

/// Aggregate results of one suite execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Suite name.
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Case reports in execution order.
    pub cases: Vec<CaseReport>,
    /// Number of cases.
    pub total: usize,
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed an assertion or prerequisite.
    pub failed: usize,
    /// Cases that could not be executed.
    pub errored: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Builds a report, deriving the counters from `cases`.
    #[must_use]
    pub fn new(
        run_id: Uuid,
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        cases: Vec<CaseReport>,
        duration_ms: u64,
    ) -> Self {
        let count = |status: CaseStatus| cases.iter().filter(|c| c.status == status).count();
        let passed = count(CaseStatus::Passed);
        let failed = count(CaseStatus::Failed);
        let errored = count(CaseStatus::Errored);

        Self {
            run_id,
            suite_name: suite_name.into(),
            started_at,
            total: cases.len(),
            passed,
            failed,
            errored,
            cases,
            duration_ms,
        }
    }

    /// True only if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Looks up a case report by name.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} passed, {} failed, {} errored of {} ({} ms)",
            self.suite_name, self.passed, self.failed, self.errored, self.total, self.duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn case(name: &str, status: CaseStatus, failure: Option<CaseFailure>) -> CaseReport {
        CaseReport {
            name: name.to_string(),
            order: Some(1),
            status,
            failure,
            assertions: Vec::new(),
            duration_ms: 12,
        }
    }

    #[test]
    fn test_failure_display() {
        let absent = AssertionFailure::at("data.id", "2", None);
        assert_eq!(absent.to_string(), "data.id: expected 2, got <absent>");

        let status = AssertionFailure::status("in [204, 200]", 404);
        assert_eq!(status.to_string(), "status code: expected in [204, 200], got 404");
    }

    #[test]
    fn test_case_line() {
        let line = case(
            "read user",
            CaseStatus::Failed,
            Some(CaseFailure::Assertion(AssertionFailure::at(
                "data.id",
                "2",
                Some("3".into()),
            ))),
        )
        .to_string();
        assert_eq!(line, "[FAIL ]  1. read user (12 ms): data.id: expected 2, got 3");
    }

    #[test]
    fn test_suite_counts() {
        let report = SuiteReport::new(
            Uuid::now_v7(),
            "reqres",
            Utc::now(),
            vec![
                case("a", CaseStatus::Passed, None),
                case("b", CaseStatus::Failed, Some(CaseFailure::MissingFixture("id".into()))),
                case("c", CaseStatus::Errored, Some(CaseFailure::Transport("timeout".into()))),
            ],
            30,
        );

        assert_eq!(report.total, 3);
        assert_eq!((report.passed, report.failed, report.errored), (1, 1, 1));
        assert!(!report.all_passed());
        assert!(report.case("b").is_some());
    }

    #[test]
    fn test_empty_suite_passes() {
        let report = SuiteReport::new(Uuid::now_v7(), "empty", Utc::now(), Vec::new(), 0);
        assert!(report.all_passed());
        assert_eq!(report.total, 0);
    }
}
