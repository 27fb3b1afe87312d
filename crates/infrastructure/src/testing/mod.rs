//! Contract testing module.
//!
//! Evaluates case expectations against responses and runs whole suites.

mod evaluator;
mod runner;

pub use evaluator::{AssertionEvaluator, Evaluation};
pub use runner::SuiteRunner;
