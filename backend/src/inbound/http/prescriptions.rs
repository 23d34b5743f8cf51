//! Prescription HTTP handlers.
//!
//! ```text
//! POST /api/v1/prescriptions
//! POST /api/v1/prescriptions/{treatmentId}
//! GET /api/v1/prescriptions/{prescriptionId}
//! GET /api/v1/prescriptions/treatment/{treatmentId}
//! GET /api/v1/prescriptions/professional/{professionalId}
//! GET /api/v1/prescriptions/patient/{patientId}
//! PUT /api/v1/prescriptions/{prescriptionId}/pills
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AddPillRequest, CreatePrescriptionRequest, GetPrescriptionRequest,
    ListPrescriptionsForPatientRequest, ListPrescriptionsForProfessionalRequest,
    ListPrescriptionsForTreatmentPlanRequest, PrescriptionDraftPayload, PrescriptionPayload,
};
use crate::domain::{Error, PillDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_required_date, parse_required_uuid, parse_uuid, require_field,
};

/// Request payload for issuing a prescription. Pills are appended separately
/// once the prescription exists. Fields are optional on the wire so their
/// absence reports `missing_field` rather than a blanket deserialization
/// error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequestBody {
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    #[schema(format = "uuid")]
    pub professional_id: Option<String>,
    #[schema(format = "date")]
    pub start_date: Option<String>,
    #[schema(format = "date")]
    pub end_date: Option<String>,
}

/// Pill entry carried on a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PillResponseBody {
    pub name: String,
    pub description: String,
}

impl From<PillDraft> for PillResponseBody {
    fn from(value: PillDraft) -> Self {
        Self {
            name: value.name,
            description: value.description,
        }
    }
}

/// Prescription resource returned by the prescription endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub patient_id: String,
    #[schema(format = "uuid")]
    pub professional_id: String,
    #[schema(format = "uuid")]
    pub treatment_plan_id: Option<String>,
    #[schema(format = "date")]
    pub start_date: String,
    #[schema(format = "date")]
    pub end_date: String,
    pub pills: Vec<PillResponseBody>,
}

impl From<PrescriptionPayload> for PrescriptionResponseBody {
    fn from(value: PrescriptionPayload) -> Self {
        Self {
            id: value.id.to_string(),
            patient_id: value.patient_id.to_string(),
            professional_id: value.professional_id.to_string(),
            treatment_plan_id: value.treatment_plan_id.map(|id| id.to_string()),
            start_date: value.start_date.to_string(),
            end_date: value.end_date.to_string(),
            pills: value.pills.into_iter().map(PillResponseBody::from).collect(),
        }
    }
}

/// Request payload for appending a pill to a prescription.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPillRequestBody {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
}

fn parse_prescription_draft(
    body: CreatePrescriptionRequestBody,
) -> Result<PrescriptionDraftPayload, Error> {
    Ok(PrescriptionDraftPayload {
        patient_id: parse_required_uuid(body.patient_id, FieldName::new("patientId"))?,
        professional_id: parse_required_uuid(body.professional_id, FieldName::new("professionalId"))?,
        start_date: parse_required_date(body.start_date, FieldName::new("startDate"))?,
        end_date: parse_required_date(body.end_date, FieldName::new("endDate"))?,
    })
}

/// Issue a prescription that is not bound to a treatment plan.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::prescriptions::{add_pill, create_prescription};
///
/// let app = App::new().service(web::scope("/api/v1").service(create_prescription).service(add_pill));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/prescriptions",
    request_body = CreatePrescriptionRequestBody,
    responses(
        (status = 201, description = "Prescription issued", body = PrescriptionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "createPrescription",
    security(("SessionCookie" = []))
)]
#[post("/prescriptions")]
pub async fn create_prescription(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePrescriptionRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = parse_prescription_draft(payload.into_inner())?;

    let response = state
        .prescriptions
        .create_prescription(CreatePrescriptionRequest {
            prescription: draft,
            treatment_plan_id: None,
        })
        .await?;

    Ok(HttpResponse::Created().json(PrescriptionResponseBody::from(response.prescription)))
}

/// Issue a prescription bound to an existing treatment plan.
#[utoipa::path(
    post,
    path = "/api/v1/prescriptions/{treatmentId}",
    params(("treatmentId" = String, Path, format = "uuid", description = "Treatment plan to bind")),
    request_body = CreatePrescriptionRequestBody,
    responses(
        (status = 201, description = "Prescription issued", body = PrescriptionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "createPrescriptionForTreatmentPlan",
    security(("SessionCookie" = []))
)]
#[post("/prescriptions/{treatmentId}")]
pub async fn create_prescription_for_treatment_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreatePrescriptionRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentId"))?;
    let draft = parse_prescription_draft(payload.into_inner())?;

    let response = state
        .prescriptions
        .create_prescription(CreatePrescriptionRequest {
            prescription: draft,
            treatment_plan_id: Some(treatment_plan_id),
        })
        .await?;

    Ok(HttpResponse::Created().json(PrescriptionResponseBody::from(response.prescription)))
}

/// Fetch a prescription by id.
#[utoipa::path(
    get,
    path = "/api/v1/prescriptions/{prescriptionId}",
    params(("prescriptionId" = String, Path, format = "uuid", description = "Prescription identifier")),
    responses(
        (status = 200, description = "Prescription", body = PrescriptionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "getPrescription",
    security(("SessionCookie" = []))
)]
#[get("/prescriptions/{prescriptionId}")]
pub async fn get_prescription(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PrescriptionResponseBody>> {
    session.require_user_id()?;
    let prescription_id = parse_uuid(path.into_inner(), FieldName::new("prescriptionId"))?;

    let response = state
        .prescriptions_query
        .get_prescription(GetPrescriptionRequest { prescription_id })
        .await?;

    Ok(web::Json(PrescriptionResponseBody::from(
        response.prescription,
    )))
}

/// List the prescriptions bound to a treatment plan.
#[utoipa::path(
    get,
    path = "/api/v1/prescriptions/treatment/{treatmentId}",
    params(("treatmentId" = String, Path, format = "uuid", description = "Treatment plan")),
    responses(
        (status = 200, description = "Prescriptions", body = [PrescriptionResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "listPrescriptionsForTreatmentPlan",
    security(("SessionCookie" = []))
)]
#[get("/prescriptions/treatment/{treatmentId}")]
pub async fn list_prescriptions_for_treatment_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PrescriptionResponseBody>>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentId"))?;

    let response = state
        .prescriptions_query
        .list_prescriptions_for_treatment_plan(ListPrescriptionsForTreatmentPlanRequest {
            treatment_plan_id,
        })
        .await?;

    Ok(web::Json(
        response
            .prescriptions
            .into_iter()
            .map(PrescriptionResponseBody::from)
            .collect(),
    ))
}

/// List the prescriptions issued by a professional.
#[utoipa::path(
    get,
    path = "/api/v1/prescriptions/professional/{professionalId}",
    params(("professionalId" = String, Path, format = "uuid", description = "Issuing professional")),
    responses(
        (status = 200, description = "Prescriptions", body = [PrescriptionResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "listPrescriptionsForProfessional",
    security(("SessionCookie" = []))
)]
#[get("/prescriptions/professional/{professionalId}")]
pub async fn list_prescriptions_for_professional(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PrescriptionResponseBody>>> {
    session.require_user_id()?;
    let professional_id = parse_uuid(path.into_inner(), FieldName::new("professionalId"))?;

    let response = state
        .prescriptions_query
        .list_prescriptions_for_professional(ListPrescriptionsForProfessionalRequest {
            professional_id,
        })
        .await?;

    Ok(web::Json(
        response
            .prescriptions
            .into_iter()
            .map(PrescriptionResponseBody::from)
            .collect(),
    ))
}

/// List the prescriptions issued to a patient.
#[utoipa::path(
    get,
    path = "/api/v1/prescriptions/patient/{patientId}",
    params(("patientId" = String, Path, format = "uuid", description = "Receiving patient")),
    responses(
        (status = 200, description = "Prescriptions", body = [PrescriptionResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "listPrescriptionsForPatient",
    security(("SessionCookie" = []))
)]
#[get("/prescriptions/patient/{patientId}")]
pub async fn list_prescriptions_for_patient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PrescriptionResponseBody>>> {
    session.require_user_id()?;
    let patient_id = parse_uuid(path.into_inner(), FieldName::new("patientId"))?;

    let response = state
        .prescriptions_query
        .list_prescriptions_for_patient(ListPrescriptionsForPatientRequest { patient_id })
        .await?;

    Ok(web::Json(
        response
            .prescriptions
            .into_iter()
            .map(PrescriptionResponseBody::from)
            .collect(),
    ))
}

/// Append a pill to an existing prescription.
#[utoipa::path(
    put,
    path = "/api/v1/prescriptions/{prescriptionId}/pills",
    params(("prescriptionId" = String, Path, format = "uuid", description = "Prescription identifier")),
    request_body = AddPillRequestBody,
    responses(
        (status = 200, description = "Pill appended; updated prescription", body = PrescriptionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "addPill",
    security(("SessionCookie" = []))
)]
#[put("/prescriptions/{prescriptionId}/pills")]
pub async fn add_pill(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddPillRequestBody>,
) -> ApiResult<web::Json<PrescriptionResponseBody>> {
    session.require_user_id()?;
    let prescription_id = parse_uuid(path.into_inner(), FieldName::new("prescriptionId"))?;
    let body = payload.into_inner();
    let pill = PillDraft {
        name: require_field(body.name, FieldName::new("name"))?,
        description: body.description,
    };

    let response = state
        .prescriptions
        .add_pill(AddPillRequest {
            prescription_id,
            pill,
        })
        .await?;

    Ok(web::Json(PrescriptionResponseBody::from(
        response.prescription,
    )))
}

#[cfg(test)]
#[path = "prescriptions_tests.rs"]
mod tests;
