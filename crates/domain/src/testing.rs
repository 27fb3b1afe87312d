//! Contract test cases and their expectations.
//!
//! A [`TestCase`] pairs a request with an expected status and an ordered
//! list of [`BodyAssertion`]s. Cases are grouped into a [`TestSuite`], whose
//! [`TestSuite::execution_order`] fixes the sequence the runner follows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::RequestBuilder;

/// Expected status code value, set or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Create a set-membership expectation.
    #[must_use]
    pub fn one_of(codes: impl IntoIterator<Item = u16>) -> Self {
        Self::OneOf(codes.into_iter().collect())
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// A structural check on the response body.
///
/// Paths use the [`JsonPath`](crate::json_path::JsonPath) syntax and are
/// parsed when the assertion is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyAssertion {
    /// Value at `path` deep-equals `expected`.
    Equals {
        /// JSON path expression.
        path: String,
        /// Expected literal.
        expected: Value,
    },
    /// Value at `path` exists and is not JSON null.
    NotNull {
        /// JSON path expression.
        path: String,
    },
    /// Value at `path` is a non-empty array, object or string.
    NotEmpty {
        /// JSON path expression.
        path: String,
    },
    /// Value at `path` is an array of exactly `size` elements.
    HasSize {
        /// JSON path expression.
        path: String,
        /// Required element count.
        size: usize,
    },
    /// The entire body is the empty object `{}`.
    EmptyObjectBody,
}

impl BodyAssertion {
    /// Equality against a JSON literal.
    #[must_use]
    pub fn equals(path: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::Equals {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Presence and non-null check.
    #[must_use]
    pub fn not_null(path: impl Into<String>) -> Self {
        Self::NotNull { path: path.into() }
    }

    /// Non-empty collection check.
    #[must_use]
    pub fn not_empty(path: impl Into<String>) -> Self {
        Self::NotEmpty { path: path.into() }
    }

    /// Exact array size check.
    #[must_use]
    pub fn has_size(path: impl Into<String>, size: usize) -> Self {
        Self::HasSize {
            path: path.into(),
            size,
        }
    }

    /// The JSON path this assertion addresses, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Equals { path, .. }
            | Self::NotNull { path }
            | Self::NotEmpty { path }
            | Self::HasSize { path, .. } => Some(path),
            Self::EmptyObjectBody => None,
        }
    }

    /// Human-readable description of the expectation, without the path.
    #[must_use]
    pub fn expectation(&self) -> String {
        match self {
            Self::Equals { expected, .. } => expected.to_string(),
            Self::NotNull { .. } => "not null".to_string(),
            Self::NotEmpty { .. } => "not empty".to_string(),
            Self::HasSize { size, .. } => format!("size {size}"),
            Self::EmptyObjectBody => "{}".to_string(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Equals { path, expected } => format!("JSON {path} equals {expected}"),
            Self::NotNull { path } => format!("JSON {path} is not null"),
            Self::NotEmpty { path } => format!("JSON {path} is not empty"),
            Self::HasSize { path, size } => format!("JSON {path} has size {size}"),
            Self::EmptyObjectBody => "Body equals {}".to_string(),
        }
    }
}

/// Copies a response value into fixture state once a case has passed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capture {
    /// JSON path of the value to capture.
    pub path: String,
    /// Fixture key the value is stored under.
    pub key: String,
}

/// One request/assert case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Case name, used in reports.
    pub name: String,
    /// Position in the suite's execution sequence, if ordered.
    pub order: Option<u32>,
    /// The request to send. Its path may contain `{{key}}` fixture
    /// placeholders.
    pub request: RequestBuilder,
    /// Acceptable status codes.
    pub expected_status: StatusExpectation,
    /// Body checks, evaluated in order.
    pub assertions: Vec<BodyAssertion>,
    /// Values written to fixture state when the case passes.
    pub captures: Vec<Capture>,
}

impl TestCase {
    /// Creates an unordered case expecting a 2xx status.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestBuilder) -> Self {
        Self {
            name: name.into(),
            order: None,
            request,
            expected_status: StatusExpectation::default(),
            assertions: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Sets the execution order.
    #[must_use]
    pub const fn order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Expects an exact status code.
    #[must_use]
    pub fn expect_status(mut self, code: u16) -> Self {
        self.expected_status = StatusExpectation::exact(code);
        self
    }

    /// Expects any of the given status codes.
    #[must_use]
    pub fn expect_any_status(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.expected_status = StatusExpectation::one_of(codes);
        self
    }

    /// Appends a body assertion.
    #[must_use]
    pub fn assert(mut self, assertion: BodyAssertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Captures the value at `path` into fixture `key` after the case passes.
    #[must_use]
    pub fn capture(mut self, path: impl Into<String>, key: impl Into<String>) -> Self {
        self.captures.push(Capture {
            path: path.into(),
            key: key.into(),
        });
        self
    }
}

/// A named, ordered collection of cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSuite {
    /// Suite name.
    pub name: String,
    /// Cases in declaration order.
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Add a case (builder pattern).
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Returns the cases in the order they must run: ordered cases by
    /// ascending `order` (ties keep declaration order), then unordered
    /// cases in declaration order.
    #[must_use]
    pub fn execution_order(&self) -> Vec<&TestCase> {
        let mut cases: Vec<&TestCase> = self.cases.iter().collect();
        cases.sort_by_key(|case| (case.order.is_none(), case.order));
        cases
    }

    /// Check if the suite is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Get the number of cases.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.cases.len()
    }
}
