//! Concrete contract suites.

pub mod reqres;
pub mod template;
