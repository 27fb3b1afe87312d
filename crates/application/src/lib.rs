//! Probe Application - Ports and use cases
//!
//! This crate sits between the pure domain model and the infrastructure
//! adapters. It defines the `HttpClient` port, the harness error taxonomy,
//! fixture placeholder resolution and the request execution use case.

pub mod error;
pub mod fixtures;
pub mod ports;
pub mod use_cases;

pub use error::{HarnessError, HarnessResult};
