//! Tests for error construction, trace capture, and wire shape.

use super::*;
use rstest::rstest;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_matching_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn with_details_attaches_payload() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "patientId"}));
    assert_eq!(error.details(), Some(&json!({"field": "patientId"})));
}

#[rstest]
fn display_renders_the_message() {
    let error = Error::invalid_request("patientId must be a UUID");
    assert_eq!(error.to_string(), "patientId must be a UUID");
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("constant is a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[tokio::test]
async fn redacted_keeps_code_and_trace_id_but_drops_details() {
    let trace_id: TraceId = TRACE_ID.parse().expect("constant is a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::internal("secret detail").with_details(json!({"query": "SELECT ..."}))
    })
    .await;

    let redacted = error.redacted("Internal server error");

    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialisation_omits_absent_optional_fields() {
    let error = Error::invalid_request("bad");
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(value, json!({"code": "invalid_request", "message": "bad"}));
}

#[rstest]
#[tokio::test]
async fn serialisation_uses_camel_case_trace_id() {
    let trace_id: TraceId = TRACE_ID.parse().expect("constant is a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::unauthorized("login required") }).await;
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(value.get("traceId"), Some(&json!(TRACE_ID)));
    assert!(value.get("trace_id").is_none());
}

#[rstest]
fn deserialisation_accepts_snake_case_alias() {
    let error: Error = serde_json::from_value(json!({
        "code": "internal_error",
        "message": "boom",
        "trace_id": TRACE_ID,
    }))
    .expect("alias form deserialises");

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
