//! Suite runner.
//!
//! Executes the cases of a [`TestSuite`] one at a time in their fixed
//! order, threading a [`FixtureState`] through the run so later cases can
//! use values captured by earlier ones.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use probe_application::fixtures::resolve_placeholders;
use probe_application::ports::HttpClient;
use probe_application::use_cases::ExecuteRequest;
use probe_application::HarnessError;
use probe_domain::{
    AssertionFailure, AssertionResult, CaseFailure, CaseReport, CaseStatus, FixtureState,
    JsonPath, SuiteConfig, SuiteReport, TestCase, TestSuite, response::ResponseSpec,
};
use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::evaluator::AssertionEvaluator;

/// How a case ended, before it is turned into a report.
enum Outcome {
    Passed(Vec<AssertionResult>),
    Failed(CaseFailure, Vec<AssertionResult>),
    Errored(CaseFailure),
}

/// Runs suites against one configuration.
///
/// The runner owns its [`SuiteConfig`]; it is fixed for every case of every
/// run.
pub struct SuiteRunner<C: HttpClient> {
    executor: ExecuteRequest<C>,
    config: SuiteConfig,
    evaluator: AssertionEvaluator,
}

impl<C: HttpClient> SuiteRunner<C> {
    /// Creates a runner sending requests through `client`.
    pub const fn new(client: Arc<C>, config: SuiteConfig) -> Self {
        Self {
            executor: ExecuteRequest::new(client),
            config,
            evaluator: AssertionEvaluator::new(),
        }
    }

    /// The configuration every case is built against.
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Runs every case of `suite` sequentially and aggregates the results.
    ///
    /// Failures never abort the run: each case ends in a terminal status and
    /// the next case starts only after the previous one finished.
    pub async fn run(&self, suite: &TestSuite) -> SuiteReport {
        let run_id = Uuid::now_v7();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(suite = %suite.name, %run_id, cases = suite.len(), base_uri = self.config.base_uri(), "Starting suite");

        let mut fixtures = FixtureState::new();
        let mut reports = Vec::with_capacity(suite.len());
        for case in suite.execution_order() {
            let span = info_span!("case", suite = %suite.name, case = %case.name, order = case.order);
            let report = self.run_case(case, &mut fixtures).instrument(span).await;
            reports.push(report);
        }

        let report = SuiteReport::new(
            run_id,
            &suite.name,
            started_at,
            reports,
            elapsed_ms(start.elapsed()),
        );
        info!(
            suite = %suite.name,
            passed = report.passed,
            failed = report.failed,
            errored = report.errored,
            duration_ms = report.duration_ms,
            "Suite finished"
        );
        report
    }

    /// Runs one case to a terminal status, reading and writing `fixtures`.
    pub async fn run_case(&self, case: &TestCase, fixtures: &mut FixtureState) -> CaseReport {
        let start = Instant::now();
        let mut status = CaseStatus::Pending;
        advance(&mut status, CaseStatus::Running);

        let (failure, assertions) = match self.execute_case(case, fixtures).await {
            Outcome::Passed(assertions) => {
                advance(&mut status, CaseStatus::Passed);
                (None, assertions)
            }
            Outcome::Failed(failure, assertions) => {
                advance(&mut status, CaseStatus::Failed);
                (Some(failure), assertions)
            }
            Outcome::Errored(failure) => {
                advance(&mut status, CaseStatus::Errored);
                (Some(failure), Vec::new())
            }
        };

        let duration_ms = elapsed_ms(start.elapsed());
        match &failure {
            None => info!(%status, duration_ms, "Case passed"),
            Some(failure) => warn!(%status, duration_ms, %failure, "Case did not pass"),
        }

        CaseReport {
            name: case.name.clone(),
            order: case.order,
            status,
            failure,
            assertions,
            duration_ms,
        }
    }

    async fn execute_case(&self, case: &TestCase, fixtures: &mut FixtureState) -> Outcome {
        let path = match resolve_placeholders(case.request.path(), fixtures) {
            Ok(path) => path,
            Err(e) => return Outcome::Failed(e.to_case_failure(), Vec::new()),
        };

        let request = match case.request.with_path(path).build(&self.config) {
            Ok(request) => request,
            Err(e) => return Outcome::Errored(HarnessError::from(e).to_case_failure()),
        };
        debug!(method = %request.method, url = %request.url, "Resolved request");

        let response = match self.executor.execute(&request).await {
            Ok(response) => response,
            Err(e) => return Outcome::Errored(e.to_case_failure()),
        };
        debug!(status = response.status, size = response.size, "Received response");

        let evaluation =
            self.evaluator
                .evaluate(&case.expected_status, &case.assertions, &response);
        if let Some(failure) = evaluation.failure {
            return Outcome::Failed(CaseFailure::Assertion(failure), evaluation.results);
        }

        match capture(case, &response) {
            Ok(captured) => {
                for (key, value) in captured {
                    debug!(fixture = %key, "Captured fixture");
                    fixtures.insert(key, value);
                }
                Outcome::Passed(evaluation.results)
            }
            Err(failure) => Outcome::Failed(CaseFailure::Assertion(failure), evaluation.results),
        }
    }
}

/// Resolves every capture of `case`. Nothing is written unless all of them
/// resolve.
fn capture(case: &TestCase, response: &ResponseSpec) -> Result<Vec<(String, Value)>, AssertionFailure> {
    if case.captures.is_empty() {
        return Ok(Vec::new());
    }

    let document = response.json_body();
    case.captures
        .iter()
        .map(|capture| -> Result<(String, Value), AssertionFailure> {
            let value = JsonPath::parse(&capture.path)
                .ok()
                .zip(document.as_ref())
                .and_then(|(path, document)| path.resolve(document).cloned())
                .ok_or_else(|| AssertionFailure::at(&capture.path, "capturable value", None))?;
            Ok((capture.key.clone(), value))
        })
        .collect()
}

fn advance(status: &mut CaseStatus, next: CaseStatus) {
    if let Err(e) = status.transition(next) {
        error!(error = %e, "Case lifecycle violated");
    }
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapters::ReqwestHttpClient;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use probe_domain::request::{RequestBody, RequestBuilder};
    use probe_domain::BodyAssertion;
    use serde_json::json;

    fn runner(base: &str) -> SuiteRunner<ReqwestHttpClient> {
        let config = SuiteConfig::new(base)
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        SuiteRunner::new(Arc::new(ReqwestHttpClient::new().unwrap()), config)
    }

    fn names(report: &SuiteReport) -> Vec<&str> {
        report.cases.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fixture_flows_to_later_cases() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/users");
                then.status(201)
                    .header("content-type", "application/json")
                    .json_body(json!({"name": "John", "id": "417"}));
            })
            .await;
        let read = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/users/417");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"data": {"id": 417}}));
            })
            .await;

        let suite = TestSuite::new("fixtures")
            .with_case(
                TestCase::new("read created", RequestBuilder::get("/users/{{created_user_id}}"))
                    .order(2)
                    .expect_status(200)
                    .assert(BodyAssertion::equals("data.id", 417)),
            )
            .with_case(
                TestCase::new(
                    "create",
                    RequestBuilder::post("/users").json(json!({"name": "John"})),
                )
                .order(1)
                .expect_status(201)
                .capture("id", "created_user_id"),
            );

        let report = runner(&server.url("/api")).run(&suite).await;

        read.assert_async().await;
        assert_eq!(names(&report), vec!["create", "read created"]);
        assert!(report.all_passed(), "{report:?}");
    }

    #[tokio::test]
    async fn test_missing_fixture_fails_case_and_suite_continues() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/users");
                then.status(500);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/unknown");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"data": [{"id": 1}]}));
            })
            .await;

        let suite = TestSuite::new("prerequisites")
            .with_case(
                TestCase::new("create", RequestBuilder::post("/users"))
                    .order(1)
                    .expect_status(201)
                    .capture("id", "user_id"),
            )
            .with_case(
                TestCase::new("read", RequestBuilder::get("/users/{{user_id}}"))
                    .order(2)
                    .expect_status(200),
            )
            .with_case(
                TestCase::new("list", RequestBuilder::get("/unknown"))
                    .order(3)
                    .expect_status(200)
                    .assert(BodyAssertion::not_empty("data")),
            );

        let report = runner(&server.base_url()).run(&suite).await;

        let statuses: Vec<_> = report.cases.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![CaseStatus::Failed, CaseStatus::Failed, CaseStatus::Passed]
        );
        assert_eq!(
            report.case("read").unwrap().failure,
            Some(CaseFailure::MissingFixture("user_id".to_string()))
        );
        assert!(!report.all_passed());
        assert_eq!((report.passed, report.failed, report.errored), (1, 2, 0));
    }

    #[tokio::test]
    async fn test_absent_capture_fails_case() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/register");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"token": "QpwL5tke4Pnpja7X4"}));
            })
            .await;

        let case = TestCase::new("register", RequestBuilder::post("/register"))
            .expect_status(200)
            .capture("id", "user_id");

        let mut fixtures = FixtureState::new();
        let report = runner(&server.base_url()).run_case(&case, &mut fixtures).await;

        assert_eq!(report.status, CaseStatus::Failed);
        assert_eq!(
            report.failure,
            Some(CaseFailure::Assertion(AssertionFailure::at("id", "capturable value", None)))
        );
        assert!(fixtures.is_empty());
    }

    #[tokio::test]
    async fn test_construction_error_is_errored_without_assertions() {
        let case = TestCase::new(
            "bad body",
            RequestBuilder::post("/users").body(RequestBody::raw("{\"name\":")),
        )
        .expect_status(201);

        let report = runner("http://127.0.0.1:1")
            .run_case(&case, &mut FixtureState::new())
            .await;

        assert_eq!(report.status, CaseStatus::Errored);
        assert!(matches!(report.failure, Some(CaseFailure::RequestConstruction(_))));
        assert!(report.assertions.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_errored() {
        let suite = TestSuite::new("unreachable").with_case(
            TestCase::new("read", RequestBuilder::get("/users/2")).expect_status(200),
        );

        let report = runner("http://127.0.0.1:1/api").run(&suite).await;

        assert_eq!(report.errored, 1);
        assert!(matches!(
            report.cases[0].failure,
            Some(CaseFailure::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_order_is_stable_across_runs() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let suite = TestSuite::new("ordering")
            .with_case(TestCase::new("unordered a", RequestBuilder::get("/a")))
            .with_case(TestCase::new("third", RequestBuilder::get("/c")).order(3))
            .with_case(TestCase::new("first", RequestBuilder::get("/a")).order(1))
            .with_case(TestCase::new("unordered b", RequestBuilder::get("/b")))
            .with_case(TestCase::new("second", RequestBuilder::get("/b")).order(2));

        let runner = runner(&server.base_url());
        let first = runner.run(&suite).await;
        let second = runner.run(&suite).await;

        let expected = vec!["first", "second", "third", "unordered a", "unordered b"];
        assert_eq!(names(&first), expected);
        assert_eq!(names(&second), expected);
        assert_ne!(first.run_id, second.run_id);
        assert!(first.all_passed());
    }

    #[tokio::test]
    async fn test_uppercase_scheme_base_is_accepted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/2");
                then.status(200);
            })
            .await;

        let base = format!("HTTP://127.0.0.1:{}", server.port());
        let case = TestCase::new("read", RequestBuilder::get("/users/2")).expect_status(200);
        let report = runner(&base).run_case(&case, &mut FixtureState::new()).await;

        assert_eq!(report.status, CaseStatus::Passed, "{:?}", report.failure);
    }
}
