//! Probe Infrastructure - Adapters and the contract-test engine
//!
//! This crate provides the reqwest-backed `HttpClient` adapter, the
//! assertion evaluator and the suite runner.

pub mod adapters;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use testing::{AssertionEvaluator, Evaluation, SuiteRunner};
