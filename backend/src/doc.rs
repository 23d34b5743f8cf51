//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`])
//!   that provide OpenAPI definitions without coupling domain types to the
//!   utoipa framework
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Clinical practice backend API",
        description = "HTTP interface for managing patients, professionals, clinical sessions, \
                       prescriptions and treatment plans.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::get_patient_for_user,
        crate::inbound::http::patients::list_patients_for_professional,
        crate::inbound::http::professionals::create_professional,
        crate::inbound::http::professionals::list_professionals,
        crate::inbound::http::professionals::get_professional,
        crate::inbound::http::professionals::get_professional_for_user,
        crate::inbound::http::sessions::create_session,
        crate::inbound::http::sessions::get_session,
        crate::inbound::http::sessions::list_sessions_for_professional,
        crate::inbound::http::sessions::list_sessions_for_treatment_plan,
        crate::inbound::http::sessions::add_note,
        crate::inbound::http::sessions::list_notes,
        crate::inbound::http::prescriptions::create_prescription,
        crate::inbound::http::prescriptions::create_prescription_for_treatment_plan,
        crate::inbound::http::prescriptions::get_prescription,
        crate::inbound::http::prescriptions::list_prescriptions_for_treatment_plan,
        crate::inbound::http::prescriptions::list_prescriptions_for_professional,
        crate::inbound::http::prescriptions::list_prescriptions_for_patient,
        crate::inbound::http::prescriptions::add_pill,
        crate::inbound::http::treatment_plans::create_treatment_plan,
        crate::inbound::http::treatment_plans::get_treatment_plan,
        crate::inbound::http::treatment_plans::list_treatment_plans_for_patient,
        crate::inbound::http::treatment_plans::add_task,
        crate::inbound::http::treatment_plans::add_biological_function,
        crate::inbound::http::treatment_plans::add_diagnostic,
        crate::inbound::http::treatment_plans::add_patient_state,
        crate::inbound::http::treatment_plans::execute_task,
        crate::inbound::http::treatment_plans::list_tasks,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Account listing and login"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "patients", description = "Patient profile management"),
        (name = "professionals", description = "Professional profile management"),
        (name = "sessions", description = "Clinical session scheduling and notes"),
        (name = "prescriptions", description = "Prescriptions and their pills"),
        (name = "treatment-plans", description = "Treatment plans and attached clinical records")
    )
)]
pub struct ApiDoc;
