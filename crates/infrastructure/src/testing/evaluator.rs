//! Assertion evaluator.
//!
//! Checks a response against a case's status expectation and body
//! assertions. Evaluation is a pure function of its inputs: the response is
//! only borrowed and nothing is cached between calls.

use probe_domain::{
    AssertionFailure, AssertionResult, BodyAssertion, JsonPath, StatusExpectation,
    response::ResponseSpec,
};
use serde_json::Value;

/// Longest body excerpt quoted in a failure.
const PREVIEW_CHARS: usize = 100;

/// Outcome of one check: the actual value on success, the mismatch on
/// failure.
type Check = Result<Option<String>, AssertionFailure>;

/// Results of evaluating one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Checks performed, in order. Stops after the first failing one.
    pub results: Vec<AssertionResult>,
    /// The first mismatch, if any.
    pub failure: Option<AssertionFailure>,
}

impl Evaluation {
    /// True when every check held.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Evaluates expectations against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionEvaluator;

impl AssertionEvaluator {
    /// Create a new evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks the status first, then each body assertion in order,
    /// stopping at the first failure.
    #[must_use]
    pub fn evaluate(
        &self,
        expected_status: &StatusExpectation,
        assertions: &[BodyAssertion],
        response: &ResponseSpec,
    ) -> Evaluation {
        let mut results = Vec::with_capacity(assertions.len() + 1);

        let status_description = format!("Status code {}", expected_status.description());
        match Self::check_status(expected_status, response) {
            Ok(actual) => results.push(AssertionResult::pass(status_description, actual)),
            Err(failure) => {
                results.push(AssertionResult::fail(status_description, failure.actual.clone()));
                return Evaluation {
                    results,
                    failure: Some(failure),
                };
            }
        }

        let document = response.json_body();
        for assertion in assertions {
            match self.check(assertion, document.as_ref(), response) {
                Ok(actual) => results.push(AssertionResult::pass(assertion.description(), actual)),
                Err(failure) => {
                    results.push(AssertionResult::fail(
                        assertion.description(),
                        failure.actual.clone(),
                    ));
                    return Evaluation {
                        results,
                        failure: Some(failure),
                    };
                }
            }
        }

        Evaluation {
            results,
            failure: None,
        }
    }

    /// Runs a single body assertion against an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns the mismatch when the assertion does not hold, including
    /// when the path is malformed, resolves to nothing or the body is not
    /// JSON.
    pub fn check(
        &self,
        assertion: &BodyAssertion,
        document: Option<&Value>,
        response: &ResponseSpec,
    ) -> Result<Option<String>, AssertionFailure> {
        match assertion {
            BodyAssertion::EmptyObjectBody => Self::check_empty_object(response),
            BodyAssertion::Equals { path, expected } => {
                let value = Self::resolve(path, &assertion.expectation(), document)?;
                if value == expected {
                    Ok(Some(value.to_string()))
                } else {
                    Err(AssertionFailure::at(
                        path,
                        assertion.expectation(),
                        Some(value.to_string()),
                    ))
                }
            }
            BodyAssertion::NotNull { path } => {
                let value = Self::resolve(path, &assertion.expectation(), document)?;
                if value.is_null() {
                    Err(AssertionFailure::at(path, assertion.expectation(), Some("null".into())))
                } else {
                    Ok(Some(value.to_string()))
                }
            }
            BodyAssertion::NotEmpty { path } => {
                let value = Self::resolve(path, &assertion.expectation(), document)?;
                let non_empty = match value {
                    Value::Array(items) => !items.is_empty(),
                    Value::Object(fields) => !fields.is_empty(),
                    Value::String(text) => !text.is_empty(),
                    _ => false,
                };
                if non_empty {
                    Ok(Some(preview(&value.to_string())))
                } else {
                    Err(AssertionFailure::at(
                        path,
                        assertion.expectation(),
                        Some(preview(&value.to_string())),
                    ))
                }
            }
            BodyAssertion::HasSize { path, size } => {
                let value = Self::resolve(path, &assertion.expectation(), document)?;
                match value {
                    Value::Array(items) if items.len() == *size => {
                        Ok(Some(format!("size {}", items.len())))
                    }
                    Value::Array(items) => Err(AssertionFailure::at(
                        path,
                        assertion.expectation(),
                        Some(format!("size {}", items.len())),
                    )),
                    other => Err(AssertionFailure::at(
                        path,
                        assertion.expectation(),
                        Some(format!("non-array {}", preview(&other.to_string()))),
                    )),
                }
            }
        }
    }

    fn check_status(expected: &StatusExpectation, response: &ResponseSpec) -> Check {
        let actual = response.status;
        if expected.matches(actual) {
            Ok(Some(actual.to_string()))
        } else {
            Err(AssertionFailure::status(expected.description(), actual))
        }
    }

    fn check_empty_object(response: &ResponseSpec) -> Check {
        if response.body.trim_end() == "{}" {
            Ok(Some("{}".to_string()))
        } else {
            let actual = if response.body.is_empty() {
                "<empty body>".to_string()
            } else {
                preview(&response.body)
            };
            Err(AssertionFailure::at("$", "{}", Some(actual)))
        }
    }

    /// Parses `path` and resolves it in `document`.
    fn resolve<'a>(
        path: &str,
        expectation: &str,
        document: Option<&'a Value>,
    ) -> Result<&'a Value, AssertionFailure> {
        let json_path = JsonPath::parse(path).map_err(|e| {
            AssertionFailure::at(path, expectation, Some(format!("<{e}>")))
        })?;

        let document = document.ok_or_else(|| {
            AssertionFailure::at(path, expectation, Some("<non-JSON body>".to_string()))
        })?;

        json_path
            .resolve(document)
            .ok_or_else(|| AssertionFailure::at(path, expectation, None))
    }
}

/// Truncates long text for display.
fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use probe_domain::request::{Header, Headers};
    use serde_json::json;
    use std::time::Duration;

    fn make_response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = Headers::new();
        headers.add(Header::new("Content-Type", "application/json; charset=utf-8"));
        ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(50))
    }

    fn evaluate(
        status: &StatusExpectation,
        assertions: &[BodyAssertion],
        response: &ResponseSpec,
    ) -> Evaluation {
        AssertionEvaluator::new().evaluate(status, assertions, response)
    }

    #[test]
    fn test_created_user_contract() {
        let response = make_response(
            201,
            r#"{"name":"John","job":"Engineer","id":"417","createdAt":"2026-01-01T00:00:00Z"}"#,
        );
        let evaluation = evaluate(
            &StatusExpectation::exact(201),
            &[
                BodyAssertion::equals("name", "John"),
                BodyAssertion::equals("job", "Engineer"),
                BodyAssertion::not_null("id"),
            ],
            &response,
        );

        assert!(evaluation.passed());
        assert_eq!(evaluation.results.len(), 4);
        assert!(evaluation.results.iter().all(|r| r.passed));
    }

    #[test]
    fn test_status_is_checked_before_body() {
        let response = make_response(500, "not json");
        let evaluation = evaluate(
            &StatusExpectation::exact(200),
            &[BodyAssertion::equals("data.id", 2)],
            &response,
        );

        assert_eq!(evaluation.failure, Some(AssertionFailure::status("= 200", 500)));
        assert_eq!(evaluation.results.len(), 1);
    }

    #[test]
    fn test_delete_accepts_either_status() {
        let expectation = StatusExpectation::one_of([204, 200]);
        assert!(evaluate(&expectation, &[], &make_response(204, "")).passed());
        assert!(evaluate(&expectation, &[], &make_response(200, "")).passed());

        let not_found = evaluate(&expectation, &[], &make_response(404, "{}"));
        assert_eq!(
            not_found.failure.map(|f| f.to_string()),
            Some("status code: expected in [204, 200], got 404".to_string())
        );
    }

    #[test]
    fn test_absent_path_reports_absent() {
        let response = make_response(200, r#"{"data":{}}"#);
        let evaluation = evaluate(
            &StatusExpectation::exact(200),
            &[BodyAssertion::equals("data.id", 2)],
            &response,
        );

        assert_eq!(
            evaluation.failure,
            Some(AssertionFailure::at("data.id", "2", None))
        );
    }

    #[test]
    fn test_short_circuits_at_first_failure() {
        let response = make_response(200, r#"{"data":{"id":3,"email":"x@reqres.in"}}"#);
        let evaluation = evaluate(
            &StatusExpectation::exact(200),
            &[
                BodyAssertion::equals("data.id", 2),
                BodyAssertion::not_null("data.email"),
            ],
            &response,
        );

        assert_eq!(
            evaluation.failure,
            Some(AssertionFailure::at("data.id", "2", Some("3".to_string())))
        );
        assert_eq!(evaluation.results.len(), 2);
        assert!(!evaluation.results[1].passed);
    }

    #[test]
    fn test_empty_object_body() {
        let status = StatusExpectation::exact(404);
        let assertions = [BodyAssertion::EmptyObjectBody];

        assert!(evaluate(&status, &assertions, &make_response(404, "{}")).passed());
        assert!(evaluate(&status, &assertions, &make_response(404, "{}\n")).passed());
        assert!(!evaluate(&status, &assertions, &make_response(404, "{ }")).passed());
        assert!(!evaluate(&status, &assertions, &make_response(404, "{\n}")).passed());

        let evaluation = evaluate(&status, &assertions, &make_response(404, r#"{"a":1}"#));
        assert_eq!(
            evaluation.failure,
            Some(AssertionFailure::at("$", "{}", Some(r#"{"a":1}"#.to_string())))
        );
    }

    #[test]
    fn test_not_null() {
        let status = StatusExpectation::exact(200);
        let response = make_response(200, r#"{"token":null,"id":4}"#);

        assert!(evaluate(&status, &[BodyAssertion::not_null("id")], &response).passed());
        assert_eq!(
            evaluate(&status, &[BodyAssertion::not_null("token")], &response).failure,
            Some(AssertionFailure::at("token", "not null", Some("null".to_string())))
        );
        assert_eq!(
            evaluate(&status, &[BodyAssertion::not_null("missing")], &response).failure,
            Some(AssertionFailure::at("missing", "not null", None))
        );
    }

    #[test]
    fn test_not_empty() {
        let status = StatusExpectation::exact(200);
        let response = make_response(200, r#"{"data":[{"id":7}],"none":[],"obj":{},"s":"x"}"#);

        assert!(evaluate(&status, &[BodyAssertion::not_empty("data")], &response).passed());
        assert!(evaluate(&status, &[BodyAssertion::not_empty("s")], &response).passed());
        assert!(!evaluate(&status, &[BodyAssertion::not_empty("none")], &response).passed());
        assert!(!evaluate(&status, &[BodyAssertion::not_empty("obj")], &response).passed());
    }

    #[test]
    fn test_has_size() {
        let status = StatusExpectation::exact(200);
        let response = make_response(200, r#"{"data":[1,2,3,4,5,6],"per_page":6}"#);

        assert!(evaluate(&status, &[BodyAssertion::has_size("data", 6)], &response).passed());
        assert_eq!(
            evaluate(&status, &[BodyAssertion::has_size("data", 1)], &response).failure,
            Some(AssertionFailure::at("data", "size 1", Some("size 6".to_string())))
        );
        assert!(!evaluate(&status, &[BodyAssertion::has_size("per_page", 6)], &response).passed());
    }

    #[test]
    fn test_indexed_path() {
        let response = make_response(200, r#"{"data":[{"id":1,"name":"cerulean"}]}"#);
        let evaluation = evaluate(
            &StatusExpectation::exact(200),
            &[
                BodyAssertion::not_null("data[0].id"),
                BodyAssertion::not_null("$.data[0].name"),
            ],
            &response,
        );
        assert!(evaluation.passed());
    }

    #[test]
    fn test_non_json_body_fails_path_assertion() {
        let response = ResponseSpec::new(
            200,
            Headers::new(),
            b"<html></html>".to_vec(),
            Duration::from_millis(5),
        );
        let evaluation = evaluate(
            &StatusExpectation::exact(200),
            &[BodyAssertion::not_null("token")],
            &response,
        );
        assert_eq!(
            evaluation.failure,
            Some(AssertionFailure::at(
                "token",
                "not null",
                Some("<non-JSON body>".to_string())
            ))
        );
    }

    #[test]
    fn test_invalid_path_is_a_failure() {
        let response = make_response(200, r#"{"data":[]}"#);
        let evaluation = evaluate(
            &StatusExpectation::exact(200),
            &[BodyAssertion::not_null("data[x]")],
            &response,
        );
        assert!(!evaluation.passed());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let response = make_response(400, r#"{"error":"Missing password"}"#);
        let status = StatusExpectation::exact(400);
        let assertions = [BodyAssertion::equals("error", "Missing password")];

        let first = evaluate(&status, &assertions, &response);
        let second = evaluate(&status, &assertions, &response);
        assert_eq!(first, second);
        assert!(first.passed());
        assert_eq!(response, make_response(400, r#"{"error":"Missing password"}"#));
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "x".repeat(150);
        assert_eq!(preview(&long).len(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
