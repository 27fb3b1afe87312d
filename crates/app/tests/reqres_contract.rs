//! Runs the reqres suite against a local server that answers the way the
//! real service does.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use probe::suites::reqres;
use probe_domain::{CaseFailure, CaseStatus, SuiteReport};
use probe_infrastructure::{ReqwestHttpClient, SuiteRunner};
use serde_json::json;

async fn reqres_double() -> MockServer {
    let server = MockServer::start_async().await;

    let users_page = json!({
        "page": 2,
        "per_page": 6,
        "total": 12,
        "data": (7..=12).map(|id| json!({"id": id})).collect::<Vec<_>>(),
    });
    let first_page = json!({
        "page": 1,
        "per_page": 6,
        "data": (1..=6).map(|id| json!({"id": id})).collect::<Vec<_>>(),
    });
    let colors = json!({
        "page": 1,
        "data": [{"id": 1, "name": "cerulean", "year": 2000}],
    });

    let json_routes = [
        (POST, "/api/users", Some(json!({"name": "John", "job": "Engineer"})), 201,
            json!({"name": "John", "job": "Engineer", "id": "417", "createdAt": "2026-10-19T09:00:00.000Z"})),
        (POST, "/api/users", Some(json!({"name": ""})), 201,
            json!({"name": "", "id": "418"})),
        (PUT, "/api/users/2", Some(json!({"name": "Jane", "job": "Manager"})), 200,
            json!({"name": "Jane", "job": "Manager", "updatedAt": "2026-10-19T09:00:01.000Z"})),
        (POST, "/api/register", Some(json!({"email": "eve.holt@reqres.in", "password": "pistol"})), 200,
            json!({"id": 4, "token": "QpwL5tke4Pnpja7X4"})),
        (POST, "/api/register", Some(json!({"email": "sydney@fife"})), 400,
            json!({"error": "Missing password"})),
        (POST, "/api/register", Some(json!({"password": "pistol"})), 400,
            json!({"error": "Missing email or username"})),
        (POST, "/api/login", Some(json!({"email": "eve.holt@reqres.in", "password": "cityslicka"})), 200,
            json!({"token": "QpwL5tke4Pnpja7X4"})),
        (POST, "/api/login", Some(json!({"email": "peter@klaven"})), 400,
            json!({"error": "Missing password"})),
        (POST, "/api/login", Some(json!({"email": "eve.holt@reqres.in"})), 400,
            json!({"error": "Missing password"})),
        (POST, "/api/login", Some(json!({"password": "cityslicka"})), 400,
            json!({"error": "Missing email or username"})),
        (GET, "/api/users/2", None, 200,
            json!({"data": {"id": 2, "email": "janet.weaver@reqres.in", "first_name": "Janet", "last_name": "Weaver"}})),
        (GET, "/api/users/23", None, 404, json!({})),
        (GET, "/api/unknown", None, 200, colors),
        (GET, "/api/unknown/2", None, 200,
            json!({"data": {"id": 2, "name": "fuchsia rose", "year": 2001}})),
        (GET, "/api/unknown/23", None, 404, json!({})),
    ];
    for (method, path, body, status, reply) in json_routes {
        server
            .mock_async(|when, then| {
                let mut when = when.method(method).path(path);
                if let Some(body) = body {
                    when = when.json_body(body);
                }
                then.status(status)
                    .header("content-type", "application/json; charset=utf-8")
                    .json_body(reply);
            })
            .await;
    }

    for (param, value, reply) in [
        ("page", "2", users_page),
        ("delay", "3", first_page.clone()),
        ("per_page", "1", first_page),
    ] {
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/users").query_param(param, value);
                then.status(200)
                    .header("content-type", "application/json; charset=utf-8")
                    .json_body(reply);
            })
            .await;
    }

    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/users/2");
            then.status(204);
        })
        .await;

    server
}

async fn run_against(server: &MockServer) -> SuiteReport {
    let config = reqres::config(&server.url("/api")).unwrap();
    let runner = SuiteRunner::new(Arc::new(ReqwestHttpClient::new().unwrap()), config);
    runner.run(&reqres::suite()).await
}

#[tokio::test]
async fn test_every_contract_holds_against_conforming_service() {
    let server = reqres_double().await;
    let report = run_against(&server).await;

    let not_passed: Vec<_> = report
        .cases
        .iter()
        .filter(|c| !c.passed())
        .map(ToString::to_string)
        .collect();
    assert_eq!(not_passed, Vec::<String>::new());
    assert_eq!(report.total, 22);
    assert!(report.all_passed());
}

#[tokio::test]
async fn test_cases_report_in_declared_order() {
    let server = reqres_double().await;
    let report = run_against(&server).await;

    let orders: Vec<_> = report.cases.iter().map(|c| c.order).collect();
    assert_eq!(orders, (1..=22).map(Some).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_unreachable_service_errors_every_case() {
    let config = reqres::config("http://127.0.0.1:1/api").unwrap();
    let runner = SuiteRunner::new(Arc::new(ReqwestHttpClient::new().unwrap()), config);
    let report = runner.run(&reqres::suite()).await;

    assert_eq!(report.errored, 22);
    assert!(
        report
            .cases
            .iter()
            .all(|c| c.status == CaseStatus::Errored
                && matches!(c.failure, Some(CaseFailure::Transport(_))))
    );
    assert!(!report.all_passed());
}
