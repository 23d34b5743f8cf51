//! BDD-style step definitions for adapter guardrails.
//!
//! The `rstest-bdd` step macros register these functions for feature-based
//! tests, but we also call the functions directly from Rust tests to keep the
//! suite easy to read and refactor.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use actix_web::http::header;
use backend::domain::ports::{CreatePatientRequest, PatientDraftPayload};
use backend::domain::{Error, TRACE_ID_HEADER};
use backend::inbound::http::users::LoginRequest;
use chrono::NaiveDate;
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;
use uuid::Uuid;

use crate::doubles::{LoginResponse, PatientCreateResponse, UserLookupResponse, UsersResponse};
use crate::harness::{SharedWorld, with_world_async};

const MISSING_USER_ID: &str = "66666666-6666-6666-6666-666666666666";
const PATIENT_USER_ID: &str = "44444444-4444-4444-4444-444444444444";
const PATIENT_PROFESSIONAL_ID: &str = "55555555-5555-5555-5555-555555555555";

fn perform_login_request(
    world: &SharedWorld,
    username: &str,
    password: &str,
    mock_response: Option<LoginResponse>,
) {
    if let Some(response) = mock_response {
        let login = { world.borrow().login.clone() };
        login.set_response(response);
    }

    let payload = LoginRequest {
        username: username.to_owned(),
        password: password.to_owned(),
    };

    let (status, cookie_header) = with_world_async(world, |base_url| async move {
        let response = awc::Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&payload)
            .await
            .expect("login request");

        let status = response.status().as_u16();
        let cookie_header = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_owned());
        (status, cookie_header)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.session_cookie = cookie_header;
}

fn session_cookie_pair(world: &SharedWorld) -> String {
    let ctx = world.borrow();
    ctx.session_cookie
        .clone()
        .expect("session cookie set")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_owned()
}

fn perform_authenticated_get(world: &SharedWorld, path: &str) {
    let cookie = session_cookie_pair(world);
    let url_path = path.to_owned();

    let (status, json, trace_id) = with_world_async(world, |base_url| async move {
        let mut response = awc::Client::default()
            .get(format!("{base_url}{url_path}"))
            .insert_header((header::COOKIE, cookie))
            .send()
            .await
            .expect("authenticated request");

        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_owned());
        let body = response.body().await.expect("response body");
        let json: Value = serde_json::from_slice(&body).expect("response json");
        (status, json, trace_id)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(json);
    ctx.last_trace_id = trace_id;
}

fn perform_patient_create(world: &SharedWorld, mock_response: Option<PatientCreateResponse>) {
    if let Some(response) = mock_response {
        let patients = { world.borrow().patients.clone() };
        patients.set_response(response);
    }

    let cookie = session_cookie_pair(world);
    let payload = serde_json::json!({
        "fullName": "Paula Mendes",
        "email": "paula.mendes@example.com",
        "phone": "+44 20 7946 0958",
        "birthDate": "1990-05-14",
        "userId": PATIENT_USER_ID,
        "professionalId": PATIENT_PROFESSIONAL_ID,
        "clinicalHistoryStatus": true,
    });

    let (status, json, trace_id) = with_world_async(world, |base_url| async move {
        let mut response = awc::Client::default()
            .post(format!("{base_url}/api/v1/patients"))
            .insert_header((header::COOKIE, cookie))
            .send_json(&payload)
            .await
            .expect("patient create request");

        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_owned());
        let body = response.body().await.expect("patient create body");
        let json: Value = serde_json::from_slice(&body).expect("patient create json");
        (status, json, trace_id)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(json);
    ctx.last_trace_id = trace_id;
}

#[given("a running server wired with recording ports")]
pub(crate) fn a_running_server_wired_with_recording_ports(_world: SharedWorld) {}

#[given("the users backend is failing internally")]
pub(crate) fn the_users_backend_is_failing_internally(world: SharedWorld) {
    let users = { world.borrow().users.clone() };
    users.set_list_response(UsersResponse::Err(Error::internal("users backend exploded")));
}

#[when("the client logs in with valid credentials")]
pub(crate) fn the_client_logs_in_with_valid_credentials(world: SharedWorld) {
    perform_login_request(&world, "admin", "password", None);
}

#[when("the client logs in with invalid credentials")]
pub(crate) fn the_client_logs_in_with_invalid_credentials(world: SharedWorld) {
    let error_response = LoginResponse::Err(Error::unauthorized("invalid credentials"));
    perform_login_request(&world, "admin", "wrong", Some(error_response));
}

#[when("the client requests the users list")]
pub(crate) fn the_client_requests_the_users_list(world: SharedWorld) {
    perform_authenticated_get(&world, "/api/v1/users");
}

#[when("the client requests the users list without a valid session")]
pub(crate) fn the_client_requests_the_users_list_without_a_valid_session(world: SharedWorld) {
    let status = with_world_async(&world, |base_url| async move {
        let response = awc::Client::default()
            .get(format!("{base_url}/api/v1/users"))
            .send()
            .await
            .expect("users request");
        response.status().as_u16()
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
}

#[when("the client looks up a user that does not exist")]
pub(crate) fn the_client_looks_up_a_user_that_does_not_exist(world: SharedWorld) {
    let users = { world.borrow().users.clone() };
    users.set_lookup_response(UserLookupResponse::Err(
        Error::invalid_request("user not found").with_details(serde_json::json!({
            "field": "id",
            "value": MISSING_USER_ID,
            "code": "unknown_user",
        })),
    ));

    perform_authenticated_get(&world, &format!("/api/v1/users/{MISSING_USER_ID}"));
}

#[when("the client registers a patient profile")]
pub(crate) fn the_client_registers_a_patient_profile(world: SharedWorld) {
    perform_patient_create(&world, None);
}

#[when("the client registers a patient profile while storage is offline")]
pub(crate) fn the_client_registers_a_patient_profile_while_storage_is_offline(world: SharedWorld) {
    let offline = PatientCreateResponse::Err(Error::service_unavailable("patient storage offline"));
    perform_patient_create(&world, Some(offline));
}

#[then("the HTTP response is success and a session cookie is set")]
pub(crate) fn the_http_response_is_success_and_a_session_cookie_is_set(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let cookie = ctx.session_cookie.as_deref().expect("cookie present");
    assert!(
        cookie.starts_with("session="),
        "expected session cookie, got: {cookie}"
    );
}

#[then("the HTTP response is unauthorised")]
pub(crate) fn the_http_response_is_unauthorised(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
}

#[then("the HTTP response is unauthorised and no session cookie is set")]
pub(crate) fn the_http_response_is_unauthorised_and_no_session_cookie_is_set(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
    assert!(
        ctx.session_cookie.is_none(),
        "expected no Set-Cookie header on unauthorised responses"
    );
}

#[then("the login port was called with the expected credentials")]
pub(crate) fn the_login_port_was_called_with_the_expected_credentials(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.login.calls(),
        vec![("admin".to_owned(), "password".to_owned())]
    );
}

#[then("the users port was called once")]
pub(crate) fn the_users_port_was_called_once(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.users.list_calls(), 1);
}

#[then("the users port is not called")]
pub(crate) fn the_users_port_is_not_called(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.users.list_calls(), 0);
}

#[then("the users response includes the expected username")]
pub(crate) fn the_users_response_includes_the_expected_username(world: SharedWorld) {
    let ctx = world.borrow();
    let body = ctx.last_body.as_ref().expect("users body present");
    let first = body
        .as_array()
        .expect("users array")
        .first()
        .expect("user row");
    assert_eq!(
        first.get("username").and_then(Value::as_str),
        Some("ada_lovelace")
    );
}

#[then("the lookup reports an unknown account")]
pub(crate) fn the_lookup_reports_an_unknown_account(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(400));
    let body = ctx.last_body.as_ref().expect("lookup body present");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    let details = body.get("details").expect("structured details");
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("unknown_user")
    );
    assert_eq!(
        details.get("value").and_then(Value::as_str),
        Some(MISSING_USER_ID)
    );
    assert_eq!(ctx.users.lookup_calls(), vec![MISSING_USER_ID.to_owned()]);
}

#[then("the internal failure is redacted but keeps the trace header")]
pub(crate) fn the_internal_failure_is_redacted_but_keeps_the_trace_header(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(500));
    let body = ctx.last_body.as_ref().expect("error body present");
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("internal_error")
    );
    assert!(
        body.get("details").is_none(),
        "redaction must drop error details"
    );
    assert!(
        ctx.last_trace_id.is_some(),
        "every response carries a trace header"
    );
}

#[then("the patient command receives the parsed draft")]
pub(crate) fn the_patient_command_receives_the_parsed_draft(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(201));

    let expected = CreatePatientRequest {
        patient: PatientDraftPayload {
            full_name: "Paula Mendes".to_owned(),
            email: "paula.mendes@example.com".to_owned(),
            phone: "+44 20 7946 0958".to_owned(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 14).expect("fixture birth date"),
            user_id: Uuid::parse_str(PATIENT_USER_ID).expect("fixture uuid"),
            professional_id: Uuid::parse_str(PATIENT_PROFESSIONAL_ID).expect("fixture uuid"),
            clinical_history_status: true,
        },
    };
    assert_eq!(ctx.patients.calls(), vec![expected]);

    let body = ctx.last_body.as_ref().expect("patient body present");
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        Some("33333333-3333-3333-3333-333333333333")
    );
    assert_eq!(
        body.get("clinicalHistoryStatus").and_then(Value::as_bool),
        Some(false)
    );
}

#[then("the patient create reports the outage")]
pub(crate) fn the_patient_create_reports_the_outage(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(503));
    let body = ctx.last_body.as_ref().expect("error body present");
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("service_unavailable")
    );
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("patient storage offline")
    );
}
