//! Contract suite for the public reqres demo API.
//!
//! Cases run in their declared order. Case 1 captures the id of the user it
//! creates as `created_user_id`.

use probe_domain::{
    BodyAssertion, DomainResult, SuiteConfig, TestCase, TestSuite, request::RequestBuilder,
};
use serde_json::json;

/// Base URI of the reqres API.
pub const BASE_URI: &str = "https://reqres.in/api";

/// Fixture key holding the id returned by "create user".
pub const CREATED_USER_ID: &str = "created_user_id";

/// Configuration for running against `base_uri`.
///
/// # Errors
///
/// Returns an error if `base_uri` is not an absolute http(s) URL.
pub fn config(base_uri: &str) -> DomainResult<SuiteConfig> {
    SuiteConfig::new(base_uri)
}

fn missing_password(name: &str, path: &str, body: serde_json::Value) -> TestCase {
    TestCase::new(name, RequestBuilder::post(path).json(body))
        .expect_status(400)
        .assert(BodyAssertion::equals("error", "Missing password"))
}

fn missing_email(name: &str, path: &str, body: serde_json::Value) -> TestCase {
    TestCase::new(name, RequestBuilder::post(path).json(body))
        .expect_status(400)
        .assert(BodyAssertion::equals("error", "Missing email or username"))
}

fn not_found(name: &str, path: &str) -> TestCase {
    TestCase::new(name, RequestBuilder::get(path))
        .expect_status(404)
        .assert(BodyAssertion::EmptyObjectBody)
}

fn single_resource(name: &str) -> TestCase {
    TestCase::new(name, RequestBuilder::get("/unknown/2"))
        .expect_status(200)
        .assert(BodyAssertion::equals("data.id", 2))
        .assert(BodyAssertion::equals("data.name", "fuchsia rose"))
        .assert(BodyAssertion::equals("data.year", 2001))
}

/// The 22 ordered reqres cases.
#[must_use]
pub fn suite() -> TestSuite {
    let cases = [
        TestCase::new(
            "create user",
            RequestBuilder::post("/users").json(json!({"name": "John", "job": "Engineer"})),
        )
        .expect_status(201)
        .assert(BodyAssertion::equals("name", "John"))
        .assert(BodyAssertion::equals("job", "Engineer"))
        .assert(BodyAssertion::not_null("id"))
        .capture("id", CREATED_USER_ID),
        TestCase::new("read user", RequestBuilder::get("/users/2"))
            .expect_status(200)
            .assert(BodyAssertion::equals("data.id", 2))
            .assert(BodyAssertion::equals("data.email", "janet.weaver@reqres.in"))
            .assert(BodyAssertion::equals("data.first_name", "Janet"))
            .assert(BodyAssertion::equals("data.last_name", "Weaver")),
        TestCase::new(
            "update user",
            RequestBuilder::put("/users/2").json(json!({"name": "Jane", "job": "Manager"})),
        )
        .expect_status(200)
        .assert(BodyAssertion::equals("name", "Jane"))
        .assert(BodyAssertion::equals("job", "Manager"))
        .assert(BodyAssertion::not_null("updatedAt")),
        // reqres has answered both codes over time
        TestCase::new("delete user", RequestBuilder::delete("/users/2"))
            .expect_any_status([204, 200]),
        TestCase::new("list users", RequestBuilder::get("/users?page=2"))
            .expect_status(200)
            .assert(BodyAssertion::equals("page", 2))
            .assert(BodyAssertion::not_empty("data"))
            .assert(BodyAssertion::not_null("data[0].id")),
        not_found("single user not found", "/users/23"),
        TestCase::new(
            "register successful",
            RequestBuilder::post("/register")
                .json(json!({"email": "eve.holt@reqres.in", "password": "pistol"})),
        )
        .expect_status(200)
        .assert(BodyAssertion::not_null("id"))
        .assert(BodyAssertion::not_null("token")),
        missing_password(
            "register unsuccessful",
            "/register",
            json!({"email": "sydney@fife"}),
        ),
        TestCase::new(
            "login successful",
            RequestBuilder::post("/login")
                .json(json!({"email": "eve.holt@reqres.in", "password": "cityslicka"})),
        )
        .expect_status(200)
        .assert(BodyAssertion::not_null("token")),
        missing_password("login unsuccessful", "/login", json!({"email": "peter@klaven"})),
        TestCase::new("delayed response", RequestBuilder::get("/users?delay=3"))
            .expect_status(200)
            .assert(BodyAssertion::not_empty("data")),
        TestCase::new("unknown list", RequestBuilder::get("/unknown"))
            .expect_status(200)
            .assert(BodyAssertion::not_empty("data")),
        single_resource("single unknown"),
        not_found("single unknown not found", "/unknown/23"),
        TestCase::new(
            "create user with empty name",
            RequestBuilder::post("/users").json(json!({"name": ""})),
        )
        .expect_status(201)
        .assert(BodyAssertion::equals("name", "")),
        TestCase::new("resource list", RequestBuilder::get("/unknown"))
            .expect_status(200)
            .assert(BodyAssertion::not_empty("data"))
            .assert(BodyAssertion::not_null("data[0].id"))
            .assert(BodyAssertion::not_null("data[0].name")),
        single_resource("single resource"),
        not_found("single resource not found", "/unknown/23"),
        missing_email(
            "register missing email",
            "/register",
            json!({"password": "pistol"}),
        ),
        missing_email("login missing email", "/login", json!({"password": "cityslicka"})),
        missing_password(
            "login missing password",
            "/login",
            json!({"email": "eve.holt@reqres.in"}),
        ),
        // per_page is ignored by the service: pages always hold 6 users
        TestCase::new("users per page", RequestBuilder::get("/users?per_page=1"))
            .expect_status(200)
            .assert(BodyAssertion::equals("per_page", 6))
            .assert(BodyAssertion::has_size("data", 6)),
    ];

    cases
        .into_iter()
        .zip(1..)
        .fold(TestSuite::new("reqres"), |suite, (case, order)| {
            suite.with_case(case.order(order))
        })
}
