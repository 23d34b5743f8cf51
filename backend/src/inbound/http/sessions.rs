//! Clinical session HTTP handlers.
//!
//! ```text
//! POST /api/v1/sessions
//! GET /api/v1/sessions/{sessionId}
//! GET /api/v1/sessions/professional/{professionalId}
//! GET /api/v1/sessions/treatment/{treatmentPlanId}
//! PUT /api/v1/sessions/{sessionId}/notes
//! GET /api/v1/sessions/{sessionId}/notes
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    AddNoteRequest, CreateSessionRequest, GetSessionRequest, ListNotesRequest,
    ListSessionsForProfessionalRequest, ListSessionsForTreatmentPlanRequest, NoteDraftPayload,
    NotePayload, SessionDraftPayload, SessionPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_uuid, parse_required_timestamp, parse_required_uuid, parse_uuid,
    require_field,
};

/// Request payload for scheduling a clinical session. Only the treatment
/// plan binding is genuinely optional; the other fields report
/// `missing_field` when absent.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequestBody {
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    #[schema(format = "uuid")]
    pub professional_id: Option<String>,
    #[schema(format = "date-time")]
    pub session_date: Option<String>,
    #[schema(format = "uuid")]
    pub treatment_plan_id: Option<String>,
}

/// Clinical session resource returned by the session endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub patient_id: String,
    #[schema(format = "uuid")]
    pub professional_id: String,
    #[schema(format = "date-time")]
    pub session_date: String,
    #[schema(format = "uuid")]
    pub treatment_plan_id: Option<String>,
}

impl From<SessionPayload> for SessionResponseBody {
    fn from(value: SessionPayload) -> Self {
        Self {
            id: value.id.to_string(),
            patient_id: value.patient_id.to_string(),
            professional_id: value.professional_id.to_string(),
            session_date: value.session_date.to_rfc3339(),
            treatment_plan_id: value.treatment_plan_id.map(|id| id.to_string()),
        }
    }
}

/// Request payload for appending a note to a session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequestBody {
    pub content: Option<String>,
}

/// Note resource returned when listing a session's notes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub session_id: String,
    pub content: String,
}

impl From<NotePayload> for NoteResponseBody {
    fn from(value: NotePayload) -> Self {
        Self {
            id: value.id.to_string(),
            session_id: value.session_id.to_string(),
            content: value.content,
        }
    }
}

fn parse_session_draft(body: CreateSessionRequestBody) -> Result<SessionDraftPayload, Error> {
    Ok(SessionDraftPayload {
        patient_id: parse_required_uuid(body.patient_id, FieldName::new("patientId"))?,
        professional_id: parse_required_uuid(body.professional_id, FieldName::new("professionalId"))?,
        session_date: parse_required_timestamp(body.session_date, FieldName::new("sessionDate"))?,
        treatment_plan_id: parse_optional_uuid(
            body.treatment_plan_id,
            FieldName::new("treatmentPlanId"),
        )?,
    })
}

/// Schedule a clinical session.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::sessions::{add_note, create_session};
///
/// let app = App::new().service(web::scope("/api/v1").service(create_session).service(add_note));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = CreateSessionRequestBody,
    responses(
        (status = 201, description = "Session scheduled", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "createSession",
    security(("SessionCookie" = []))
)]
#[post("/sessions")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSessionRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = parse_session_draft(payload.into_inner())?;

    let response = state
        .sessions
        .create_session(CreateSessionRequest { session: draft })
        .await?;

    Ok(HttpResponse::Created().json(SessionResponseBody::from(response.session)))
}

/// Fetch a clinical session by id.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}",
    params(("sessionId" = String, Path, format = "uuid", description = "Session identifier")),
    responses(
        (status = 200, description = "Session", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getSession",
    security(("SessionCookie" = []))
)]
#[get("/sessions/{sessionId}")]
pub async fn get_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    session.require_user_id()?;
    let session_id = parse_uuid(path.into_inner(), FieldName::new("sessionId"))?;

    let response = state
        .sessions_query
        .get_session(GetSessionRequest { session_id })
        .await?;

    Ok(web::Json(SessionResponseBody::from(response.session)))
}

/// List the sessions led by a professional.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/professional/{professionalId}",
    params(("professionalId" = String, Path, format = "uuid", description = "Leading professional")),
    responses(
        (status = 200, description = "Sessions", body = [SessionResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "listSessionsForProfessional",
    security(("SessionCookie" = []))
)]
#[get("/sessions/professional/{professionalId}")]
pub async fn list_sessions_for_professional(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SessionResponseBody>>> {
    session.require_user_id()?;
    let professional_id = parse_uuid(path.into_inner(), FieldName::new("professionalId"))?;

    let response = state
        .sessions_query
        .list_sessions_for_professional(ListSessionsForProfessionalRequest { professional_id })
        .await?;

    Ok(web::Json(
        response
            .sessions
            .into_iter()
            .map(SessionResponseBody::from)
            .collect(),
    ))
}

/// List the sessions attached to a treatment plan.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/treatment/{treatmentPlanId}",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Treatment plan")),
    responses(
        (status = 200, description = "Sessions", body = [SessionResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "listSessionsForTreatmentPlan",
    security(("SessionCookie" = []))
)]
#[get("/sessions/treatment/{treatmentPlanId}")]
pub async fn list_sessions_for_treatment_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SessionResponseBody>>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;

    let response = state
        .sessions_query
        .list_sessions_for_treatment_plan(ListSessionsForTreatmentPlanRequest { treatment_plan_id })
        .await?;

    Ok(web::Json(
        response
            .sessions
            .into_iter()
            .map(SessionResponseBody::from)
            .collect(),
    ))
}

/// Append a note to an existing session.
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{sessionId}/notes",
    params(("sessionId" = String, Path, format = "uuid", description = "Session identifier")),
    request_body = AddNoteRequestBody,
    responses(
        (status = 200, description = "Note appended; updated session", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "addSessionNote",
    security(("SessionCookie" = []))
)]
#[put("/sessions/{sessionId}/notes")]
pub async fn add_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddNoteRequestBody>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    session.require_user_id()?;
    let session_id = parse_uuid(path.into_inner(), FieldName::new("sessionId"))?;
    let note = NoteDraftPayload {
        content: require_field(payload.into_inner().content, FieldName::new("content"))?,
    };

    let response = state
        .sessions
        .add_note(AddNoteRequest { session_id, note })
        .await?;

    Ok(web::Json(SessionResponseBody::from(response.session)))
}

/// List the notes recorded against a session.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/notes",
    params(("sessionId" = String, Path, format = "uuid", description = "Session identifier")),
    responses(
        (status = 200, description = "Notes", body = [NoteResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "listSessionNotes",
    security(("SessionCookie" = []))
)]
#[get("/sessions/{sessionId}/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<NoteResponseBody>>> {
    session.require_user_id()?;
    let session_id = parse_uuid(path.into_inner(), FieldName::new("sessionId"))?;

    let response = state
        .sessions_query
        .list_notes(ListNotesRequest { session_id })
        .await?;

    Ok(web::Json(
        response
            .notes
            .into_iter()
            .map(NoteResponseBody::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
