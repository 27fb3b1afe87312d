//! Use cases
//!
//! Application operations that orchestrate ports on behalf of the runner.

mod execute_request;

pub use execute_request::ExecuteRequest;
