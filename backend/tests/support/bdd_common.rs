//! Shared BDD helpers for the endpoint behaviour tests.
//!
//! These helpers centralize common request patterns and assertions to keep the
//! step implementations concise and consistent.

use actix_web::http::Method;
use serde_json::Value;

use crate::harness::WorldFixture;
use crate::http_requests::{JsonRequest, login_and_store_cookie, perform_json_request};

/// Confirm the server is running for the scenario.
pub(super) fn setup_server(world: &WorldFixture) {
    let _ = world;
}

/// Establish an authenticated session and store the session cookie.
pub(super) fn setup_authenticated_session(world: &WorldFixture) {
    let shared_world = world.world();
    login_and_store_cookie(&shared_world);
}

/// Assert the last response returned HTTP 200.
pub(super) fn assert_response_ok(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
}

/// Assert the last response returned HTTP 201.
pub(super) fn assert_response_created(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(201));
}

/// Perform a GET request with the stored session cookie.
pub(super) fn perform_get_request(world: &WorldFixture, path: &str) {
    let shared_world = world.world();
    perform_json_request(
        &shared_world,
        JsonRequest {
            include_cookie: true,
            method: Method::GET,
            path,
            payload: None,
        },
    );
}

/// Perform a mutation request with the stored session cookie.
pub(super) struct MutationRequest<'a> {
    pub(super) method: Method,
    pub(super) path: &'a str,
    pub(super) payload: Value,
}

/// Perform a mutation request with the stored session cookie.
pub(super) fn perform_mutation_request(world: &WorldFixture, request: MutationRequest<'_>) {
    let shared_world = world.world();
    perform_json_request(
        &shared_world,
        JsonRequest {
            include_cookie: true,
            method: request.method,
            path: request.path,
            payload: Some(request.payload),
        },
    );
}

/// Assert the last response is a 400 whose message reports a payload
/// validation failure. Payload failures carry no structured details.
pub(super) fn assert_invalid_payload_message(world: &WorldFixture, message: &str) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(400));
    let body = ctx.last_body.as_ref().expect("response body");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(body.get("message").and_then(Value::as_str), Some(message));
    assert!(
        body.get("details").is_none(),
        "payload failures should not carry details"
    );
}

/// Expected structured details on an `invalid_request` response.
pub(super) struct ExpectedErrorDetails<'a> {
    pub(super) message: &'a str,
    pub(super) field: &'a str,
    pub(super) value: Option<&'a str>,
    pub(super) code: &'a str,
}

/// Assert the last response is a 400 carrying the expected structured details.
pub(super) fn assert_invalid_request_details(
    world: &WorldFixture,
    expected: ExpectedErrorDetails<'_>,
) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(400));
    let body = ctx.last_body.as_ref().expect("response body");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(expected.message)
    );
    let details = body.get("details").expect("details field");
    assert_eq!(
        details.get("field").and_then(Value::as_str),
        Some(expected.field)
    );
    if let Some(value) = expected.value {
        assert_eq!(details.get("value").and_then(Value::as_str), Some(value));
    }
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some(expected.code)
    );
}
