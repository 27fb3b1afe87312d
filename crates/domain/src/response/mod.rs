//! Response model

mod spec;

pub use spec::ResponseSpec;
