//! Behaviour tests for session-enforced identity endpoints.
//!
//! These scenarios confirm that `/api/v1/users` and `/api/v1/users/{id}`
//! require authenticated sessions, that login validation failures carry
//! structured details, and that error responses echo trace identifiers.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared test doubles include helpers unused in this specific crate.
#[allow(dead_code, clippy::type_complexity)]
#[path = "adapter_guardrails/doubles.rs"]
mod doubles;
// Shared harness has extra fields used by other integration suites.
#[allow(dead_code)]
#[path = "adapter_guardrails/harness.rs"]
mod harness;

use actix_web::http::{Method, header};
use awc::Client;
use backend::domain::{Error, TRACE_ID_HEADER};
use harness::{WorldFixture, with_world_async};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

use crate::doubles::LoginResponse;
use crate::harness::SharedWorld;

const SEEDED_USER_ID: &str = "22222222-2222-2222-2222-222222222222";

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn record_response(world: &SharedWorld, status: u16, trace_id: Option<String>, body: Value) {
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

fn session_cookie(world: &SharedWorld) -> String {
    world
        .borrow()
        .session_cookie
        .clone()
        .expect("session cookie")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_owned()
}

fn login_and_store_cookie(world: &SharedWorld) {
    let (status, cookie_header) = with_world_async(world, |base_url| async move {
        let response = Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&serde_json::json!({
                "username": "admin",
                "password": "password"
            }))
            .await
            .expect("login request");

        let status = response.status().as_u16();
        let cookie_header = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        (status, cookie_header)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.session_cookie = cookie_header;
    ctx.last_trace_id = None;
    ctx.last_body = None;
}

struct RequestSpec<'a> {
    method: Method,
    path: &'a str,
    payload: Option<Value>,
    label: &'a str,
}

fn perform_json_request(world: &SharedWorld, include_cookie: bool, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        label,
    } = spec;
    let cookie = include_cookie.then(|| session_cookie(world));
    let (status, trace_id, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(label),
            None => request.send().await.expect(label),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let body = response.body().await.expect(label);
        let json: Value = serde_json::from_slice(&body).expect(label);
        (status, trace_id, json)
    });

    record_response(world, status, trace_id, body);
}

fn perform_list_users(world: &SharedWorld, include_cookie: bool) {
    perform_json_request(
        world,
        include_cookie,
        RequestSpec {
            method: Method::GET,
            path: "/api/v1/users",
            payload: None,
            label: "users list request",
        },
    );
}

fn perform_get_user(world: &SharedWorld, include_cookie: bool, id: &str, label: &str) {
    let path = format!("/api/v1/users/{id}");
    perform_json_request(
        world,
        include_cookie,
        RequestSpec {
            method: Method::GET,
            path: &path,
            payload: None,
            label,
        },
    );
}

fn perform_login_payload(world: &SharedWorld, payload: Value, label: &str) {
    let (status, trace_id, body, cookie_header) = with_world_async(world, |base_url| async move {
        let mut response = Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&payload)
            .await
            .expect(label);

        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let cookie_header = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let body = response.body().await.expect(label);
        let json: Value = serde_json::from_slice(&body).expect(label);
        (status, trace_id, json, cookie_header)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
    ctx.session_cookie = cookie_header;
}

#[given("a running server with session middleware")]
fn a_running_server_with_session_middleware(world: &WorldFixture) {
    let _ = world;
}

#[given("the client has an authenticated session")]
fn the_client_has_an_authenticated_session(world: &WorldFixture) {
    login_and_store_cookie(&world.world());
}

#[when("the client requests the users list without a session")]
fn the_client_requests_the_users_list_without_a_session(world: &WorldFixture) {
    perform_list_users(&world.world(), false);
}

#[when("the client fetches a user by id without a session")]
fn the_client_fetches_a_user_by_id_without_a_session(world: &WorldFixture) {
    perform_get_user(&world.world(), false, SEEDED_USER_ID, "user lookup request");
}

#[when("the client submits a login with a blank username")]
fn the_client_submits_a_login_with_a_blank_username(world: &WorldFixture) {
    perform_login_payload(
        &world.world(),
        serde_json::json!({ "username": "", "password": "password" }),
        "blank username login",
    );
}

#[when("the client submits a login with wrong credentials")]
fn the_client_submits_a_login_with_wrong_credentials(world: &WorldFixture) {
    let shared = world.world();
    {
        let login = { shared.borrow().login.clone() };
        login.set_response(LoginResponse::Err(Error::unauthorized("invalid credentials")));
    }
    perform_login_payload(
        &shared,
        serde_json::json!({ "username": "admin", "password": "wrong" }),
        "wrong credentials login",
    );
}

#[when("the client requests the users list")]
fn the_client_requests_the_users_list(world: &WorldFixture) {
    perform_list_users(&world.world(), true);
}

#[when("the client fetches the seeded user by id")]
fn the_client_fetches_the_seeded_user_by_id(world: &WorldFixture) {
    perform_get_user(&world.world(), true, SEEDED_USER_ID, "user lookup request");
}

#[when("the client fetches a user with a malformed id")]
fn the_client_fetches_a_user_with_a_malformed_id(world: &WorldFixture) {
    perform_get_user(&world.world(), true, "not-a-uuid", "malformed user lookup");
}

#[then("the response is unauthorised with a trace id")]
fn the_response_is_unauthorised_with_a_trace_id(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(401));

    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
}

#[then("the login is rejected without issuing a cookie")]
fn the_login_is_rejected_without_issuing_a_cookie(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(401));
    assert!(
        ctx.session_cookie.is_none(),
        "expected no Set-Cookie header on rejected logins"
    );
}

#[then("the response is a bad request with username validation details")]
fn the_response_is_a_bad_request_with_username_validation_details(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(400));

    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("username must not be empty")
    );
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );

    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details object");
    assert_eq!(
        details.get("field").and_then(Value::as_str),
        Some("username")
    );
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("empty_username")
    );

    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
}

#[then("the users listing includes the seeded account")]
fn the_users_listing_includes_the_seeded_account(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let body = ctx.last_body.as_ref().expect("users body");
    let first = body
        .as_array()
        .expect("users array")
        .first()
        .expect("user row");
    assert_eq!(
        first.get("id").and_then(Value::as_str),
        Some(SEEDED_USER_ID)
    );
    assert_eq!(
        first.get("username").and_then(Value::as_str),
        Some("ada_lovelace")
    );
}

#[then("the user response echoes the seeded account")]
fn the_user_response_echoes_the_seeded_account(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let body = ctx.last_body.as_ref().expect("user body");
    assert_eq!(body.get("id").and_then(Value::as_str), Some(SEEDED_USER_ID));
    assert_eq!(
        body.get("username").and_then(Value::as_str),
        Some("ada_lovelace")
    );
}

#[then("the response is a bad request with invalid uuid details")]
fn the_response_is_a_bad_request_with_invalid_uuid_details(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(400));

    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("id must be a valid UUID")
    );

    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details object");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("id"));
    assert_eq!(
        details.get("value").and_then(Value::as_str),
        Some("not-a-uuid")
    );
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("invalid_uuid")
    );
}

#[scenario(path = "tests/features/user_session.feature")]
fn user_session_scenarios(world: WorldFixture) {
    drop(world);
}
