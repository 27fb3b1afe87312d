//! Probe - HTTP contract tests
//!
//! Declares the concrete suites run by the `probe` binary and the pieces
//! around them: environment settings and report rendering.

pub mod report;
pub mod settings;
pub mod suites;

pub use settings::{Settings, SettingsError};
