//! Patient profile HTTP handlers.
//!
//! ```text
//! POST /api/v1/patients
//! GET /api/v1/patients/{patientId}
//! GET /api/v1/patients/user/{userId}
//! GET /api/v1/patients/professional/{professionalId}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    CreatePatientRequest, GetPatientForUserRequest, GetPatientRequest,
    ListPatientsForProfessionalRequest, PatientDraftPayload, PatientPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_required_date, parse_required_uuid, parse_uuid, require_field,
};

/// Request payload for registering a patient. Fields are optional on the
/// wire so their absence reports `missing_field` rather than a blanket
/// deserialization error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequestBody {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(format = "date")]
    pub birth_date: Option<String>,
    #[schema(format = "uuid")]
    pub user_id: Option<String>,
    #[schema(format = "uuid")]
    pub professional_id: Option<String>,
    /// Tolerated on input for wire compatibility; new registrations always
    /// start with the flag unset.
    #[serde(default)]
    pub clinical_history_status: bool,
}

/// Patient resource returned by the patient endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[schema(format = "date")]
    pub birth_date: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub professional_id: String,
    pub clinical_history_status: bool,
}

impl From<PatientPayload> for PatientResponseBody {
    fn from(value: PatientPayload) -> Self {
        Self {
            id: value.id.to_string(),
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            birth_date: value.birth_date.to_string(),
            user_id: value.user_id.to_string(),
            professional_id: value.professional_id.to_string(),
            clinical_history_status: value.clinical_history_status,
        }
    }
}

fn parse_patient_draft(body: CreatePatientRequestBody) -> Result<PatientDraftPayload, Error> {
    Ok(PatientDraftPayload {
        full_name: require_field(body.full_name, FieldName::new("fullName"))?,
        email: require_field(body.email, FieldName::new("email"))?,
        phone: require_field(body.phone, FieldName::new("phone"))?,
        birth_date: parse_required_date(body.birth_date, FieldName::new("birthDate"))?,
        user_id: parse_required_uuid(body.user_id, FieldName::new("userId"))?,
        professional_id: parse_required_uuid(body.professional_id, FieldName::new("professionalId"))?,
        clinical_history_status: body.clinical_history_status,
    })
}

/// Register a patient profile.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::patients::{create_patient, get_patient};
///
/// let app = App::new().service(web::scope("/api/v1").service(create_patient).service(get_patient));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = CreatePatientRequestBody,
    responses(
        (status = 201, description = "Patient registered", body = PatientResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient",
    security(("SessionCookie" = []))
)]
#[post("/patients")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePatientRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let patient = parse_patient_draft(payload.into_inner())?;

    let response = state
        .patients
        .create_patient(CreatePatientRequest { patient })
        .await?;

    Ok(HttpResponse::Created().json(PatientResponseBody::from(response.patient)))
}

/// Fetch a patient by id.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}",
    params(("patientId" = String, Path, format = "uuid", description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient", body = PatientResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient",
    security(("SessionCookie" = []))
)]
#[get("/patients/{patientId}")]
pub async fn get_patient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatientResponseBody>> {
    session.require_user_id()?;
    let patient_id = parse_uuid(path.into_inner(), FieldName::new("patientId"))?;

    let response = state
        .patients_query
        .get_patient(GetPatientRequest { patient_id })
        .await?;

    Ok(web::Json(PatientResponseBody::from(response.patient)))
}

/// Fetch the patient profile owned by a user account.
#[utoipa::path(
    get,
    path = "/api/v1/patients/user/{userId}",
    params(("userId" = String, Path, format = "uuid", description = "Owning user account")),
    responses(
        (status = 200, description = "Patient", body = PatientResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatientForUser",
    security(("SessionCookie" = []))
)]
#[get("/patients/user/{userId}")]
pub async fn get_patient_for_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatientResponseBody>> {
    session.require_user_id()?;
    let user_id = parse_uuid(path.into_inner(), FieldName::new("userId"))?;

    let response = state
        .patients_query
        .get_patient_for_user(GetPatientForUserRequest { user_id })
        .await?;

    Ok(web::Json(PatientResponseBody::from(response.patient)))
}

/// List the patients assigned to a professional.
#[utoipa::path(
    get,
    path = "/api/v1/patients/professional/{professionalId}",
    params(("professionalId" = String, Path, format = "uuid", description = "Assigned professional")),
    responses(
        (status = 200, description = "Patients", body = [PatientResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatientsForProfessional",
    security(("SessionCookie" = []))
)]
#[get("/patients/professional/{professionalId}")]
pub async fn list_patients_for_professional(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PatientResponseBody>>> {
    session.require_user_id()?;
    let professional_id = parse_uuid(path.into_inner(), FieldName::new("professionalId"))?;

    let response = state
        .patients_query
        .list_patients_for_professional(ListPatientsForProfessionalRequest { professional_id })
        .await?;

    Ok(web::Json(
        response
            .patients
            .into_iter()
            .map(PatientResponseBody::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "patients_tests.rs"]
mod tests;
