//! Probe Domain - Core contract-test types
//!
//! This crate defines the data model of the harness: requests and the
//! builder that resolves them, responses, JSON paths, assertions, cases,
//! suites, fixture state and reports. All types here are pure Rust with no
//! I/O dependencies.

pub mod config;
pub mod error;
pub mod fixture;
pub mod json_path;
pub mod report;
pub mod request;
pub mod response;
pub mod state;
pub mod testing;

pub use config::{DEFAULT_TIMEOUT, SuiteConfig};
pub use error::{DomainError, DomainResult};
pub use fixture::FixtureState;
pub use json_path::JsonPath;
pub use report::{AssertionFailure, AssertionResult, CaseFailure, CaseReport, SuiteReport};
pub use state::CaseStatus;
pub use testing::{BodyAssertion, Capture, StatusExpectation, TestCase, TestSuite};
