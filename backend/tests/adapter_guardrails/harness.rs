//! Server harness and shared world for adapter guardrails.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use chrono::NaiveDate;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use uuid::Uuid;

use crate::doubles::{
    LoginResponse, PatientCreateResponse, RecordingLoginService, RecordingPatientCommand,
    RecordingUsersQuery, UserLookupResponse, UsersResponse,
};
use backend::Trace;
use backend::domain::ports::{
    CreatePatientResponse, FixturePatientQuery, FixturePrescriptionCommand,
    FixturePrescriptionQuery, FixtureProfessionalCommand, FixtureProfessionalQuery,
    FixtureSessionCommand, FixtureSessionQuery, FixtureTreatmentPlanCommand,
    FixtureTreatmentPlanQuery, PatientPayload,
};
use backend::domain::{User, UserId};
use backend::inbound::http::patients::{
    create_patient, get_patient, get_patient_for_user, list_patients_for_professional,
};
use backend::inbound::http::prescriptions::{
    add_pill, create_prescription, create_prescription_for_treatment_plan, get_prescription,
    list_prescriptions_for_patient, list_prescriptions_for_professional,
    list_prescriptions_for_treatment_plan,
};
use backend::inbound::http::professionals::{
    create_professional, get_professional, get_professional_for_user, list_professionals,
};
use backend::inbound::http::sessions::{
    add_note, create_session, get_session, list_notes, list_sessions_for_professional,
    list_sessions_for_treatment_plan,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::treatment_plans::{
    add_biological_function, add_diagnostic, add_patient_state, add_task, create_treatment_plan,
    execute_task, get_treatment_plan, list_tasks, list_treatment_plans_for_patient,
};
use backend::inbound::http::users::{get_user, list_users, login as login_handler};

pub(crate) struct AdapterWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) login: RecordingLoginService,
    pub(crate) users: RecordingUsersQuery,
    pub(crate) patients: RecordingPatientCommand,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<AdapterWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_adapter_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(login_handler)
            .service(list_users)
            .service(get_user)
            .service(create_patient)
            .service(get_patient)
            .service(get_patient_for_user)
            .service(list_patients_for_professional)
            .service(create_professional)
            .service(list_professionals)
            .service(get_professional)
            .service(get_professional_for_user)
            .service(create_session)
            .service(get_session)
            .service(list_sessions_for_professional)
            .service(list_sessions_for_treatment_plan)
            .service(add_note)
            .service(list_notes)
            .service(create_prescription)
            .service(create_prescription_for_treatment_plan)
            .service(get_prescription)
            .service(list_prescriptions_for_treatment_plan)
            .service(list_prescriptions_for_professional)
            .service(list_prescriptions_for_patient)
            .service(add_pill)
            .service(create_treatment_plan)
            .service(get_treatment_plan)
            .service(list_treatment_plans_for_patient)
            .service(add_task)
            .service(add_biological_function)
            .service(add_diagnostic)
            .service(add_patient_state)
            .service(execute_task)
            .service(list_tasks);

        App::new().app_data(http_data.clone()).wrap(Trace).service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

fn create_fixture_user_id() -> UserId {
    UserId::new("11111111-1111-1111-1111-111111111111").expect("fixture user id")
}

fn fixture_uuid(value: &str) -> Uuid {
    Uuid::parse_str(value).expect("fixture uuid")
}

fn create_user_doubles(user_id: &UserId) -> (RecordingLoginService, RecordingUsersQuery) {
    let login = RecordingLoginService::new(LoginResponse::Ok(user_id.clone()));
    let listed = User::try_from_strings("22222222-2222-2222-2222-222222222222", "ada_lovelace")
        .expect("fixture user");
    let users = RecordingUsersQuery::new(
        UsersResponse::Ok(vec![listed.clone()]),
        UserLookupResponse::Ok(listed),
    );

    (login, users)
}

fn create_patient_double() -> RecordingPatientCommand {
    let stored = PatientPayload {
        id: fixture_uuid("33333333-3333-3333-3333-333333333333"),
        full_name: "Paula Mendes".to_owned(),
        email: "paula.mendes@example.com".to_owned(),
        phone: "+44 20 7946 0958".to_owned(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 14).expect("fixture birth date"),
        user_id: fixture_uuid("44444444-4444-4444-4444-444444444444"),
        professional_id: fixture_uuid("55555555-5555-5555-5555-555555555555"),
        clinical_history_status: false,
    };

    RecordingPatientCommand::new(PatientCreateResponse::Ok(CreatePatientResponse {
        patient: stored,
    }))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let user_id = create_fixture_user_id();
    let (login, users) = create_user_doubles(&user_id);
    let patients = create_patient_double();
    let http_state = HttpState::new(HttpStatePorts {
        login: Arc::new(login.clone()),
        users: Arc::new(users.clone()),
        patients: Arc::new(patients.clone()),
        patients_query: Arc::new(FixturePatientQuery),
        professionals: Arc::new(FixtureProfessionalCommand),
        professionals_query: Arc::new(FixtureProfessionalQuery),
        sessions: Arc::new(FixtureSessionCommand),
        sessions_query: Arc::new(FixtureSessionQuery),
        prescriptions: Arc::new(FixturePrescriptionCommand),
        prescriptions_query: Arc::new(FixturePrescriptionQuery),
        treatment_plans: Arc::new(FixtureTreatmentPlanCommand),
        treatment_plans_query: Arc::new(FixtureTreatmentPlanQuery),
    });

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_adapter_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(AdapterWorld {
        runtime,
        local,
        base_url,
        server,
        login,
        users,
        patients,
        last_status: None,
        last_body: None,
        last_trace_id: None,
        session_cookie: None,
    }));

    WorldFixture { world }
}
