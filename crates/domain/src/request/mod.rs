//! Request model: methods, headers, bodies and the builder that resolves
//! them into a [`RequestSpec`].

mod body;
mod builder;
mod header;
mod method;
mod spec;

pub use body::{JSON_CONTENT_TYPE, RequestBody};
pub use builder::{RequestBuilder, join_url};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use spec::RequestSpec;
