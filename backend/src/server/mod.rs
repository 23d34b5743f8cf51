//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
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
use backend::inbound::http::state::HttpState;
use backend::inbound::http::treatment_plans::{
    add_biological_function, add_diagnostic, add_patient_state, add_task, create_treatment_plan,
    execute_task, get_treatment_plan, list_tasks, list_treatment_plans_for_patient,
};
use backend::inbound::http::users::{get_user, list_users, login};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
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

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing session, binding, and database settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
