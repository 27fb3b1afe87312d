//! Template suite for an arbitrary users API behind a bearer token.
//!
//! The base URL and token come from [`Settings`]; nothing here names a real
//! service. Cases carry no order and run in declaration order.

use probe_domain::{
    BodyAssertion, DomainResult, SuiteConfig, TestCase, TestSuite, request::RequestBuilder,
};
use serde_json::json;

use crate::settings::Settings;

/// Builds the suite configuration from settings.
///
/// # Errors
///
/// Returns an error if the configured base URL is not an absolute http(s)
/// URL.
pub fn config(settings: &Settings) -> DomainResult<SuiteConfig> {
    let mut config = SuiteConfig::new(&settings.base_url)?.with_timeout(settings.timeout);
    if let Some(token) = &settings.auth_token {
        config = config.with_bearer_token(token);
    }
    Ok(config)
}

/// The four CRUD cases against `/users`.
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("template")
        .with_case(
            TestCase::new(
                "create user",
                RequestBuilder::post("/users")
                    .json(json!({"name": "John Doe", "email": "john@example.com"})),
            )
            .expect_status(201),
        )
        .with_case(
            TestCase::new("read user", RequestBuilder::get("/users/1"))
                .expect_status(200)
                .assert(BodyAssertion::equals("name", "John Doe")),
        )
        .with_case(
            TestCase::new(
                "update user",
                RequestBuilder::put("/users/1").json(json!({"name": "John Doe Updated"})),
            )
            .expect_status(200),
        )
        .with_case(
            TestCase::new("delete user", RequestBuilder::delete("/users/1")).expect_status(204),
        )
}
