//! Professional profile HTTP handlers.
//!
//! ```text
//! POST /api/v1/professionals
//! GET /api/v1/professionals
//! GET /api/v1/professionals/{professionalId}
//! GET /api/v1/professionals/user/{userId}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    CreateProfessionalRequest, GetProfessionalForUserRequest, GetProfessionalRequest,
    ProfessionalDraftPayload, ProfessionalPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_required_date, parse_required_uuid, parse_uuid, require_field,
};

/// Request payload for registering a professional. Fields are optional on
/// the wire so their absence reports `missing_field` rather than a blanket
/// deserialization error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalRequestBody {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(format = "date")]
    pub birth_date: Option<String>,
    #[schema(format = "uuid")]
    pub user_id: Option<String>,
}

/// Professional resource returned by the professional endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[schema(format = "date")]
    pub birth_date: String,
    #[schema(format = "uuid")]
    pub user_id: String,
}

impl From<ProfessionalPayload> for ProfessionalResponseBody {
    fn from(value: ProfessionalPayload) -> Self {
        Self {
            id: value.id.to_string(),
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            birth_date: value.birth_date.to_string(),
            user_id: value.user_id.to_string(),
        }
    }
}

fn parse_professional_draft(
    body: CreateProfessionalRequestBody,
) -> Result<ProfessionalDraftPayload, Error> {
    Ok(ProfessionalDraftPayload {
        full_name: require_field(body.full_name, FieldName::new("fullName"))?,
        email: require_field(body.email, FieldName::new("email"))?,
        phone: require_field(body.phone, FieldName::new("phone"))?,
        birth_date: parse_required_date(body.birth_date, FieldName::new("birthDate"))?,
        user_id: parse_required_uuid(body.user_id, FieldName::new("userId"))?,
    })
}

/// Register a professional profile.
#[utoipa::path(
    post,
    path = "/api/v1/professionals",
    request_body = CreateProfessionalRequestBody,
    responses(
        (status = 201, description = "Professional registered", body = ProfessionalResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["professionals"],
    operation_id = "createProfessional",
    security(("SessionCookie" = []))
)]
#[post("/professionals")]
pub async fn create_professional(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProfessionalRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let professional = parse_professional_draft(payload.into_inner())?;

    let response = state
        .professionals
        .create_professional(CreateProfessionalRequest { professional })
        .await?;

    Ok(HttpResponse::Created().json(ProfessionalResponseBody::from(response.professional)))
}

/// List every registered professional.
#[utoipa::path(
    get,
    path = "/api/v1/professionals",
    responses(
        (status = 200, description = "Professionals", body = [ProfessionalResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["professionals"],
    operation_id = "listProfessionals",
    security(("SessionCookie" = []))
)]
#[get("/professionals")]
pub async fn list_professionals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProfessionalResponseBody>>> {
    session.require_user_id()?;

    let response = state.professionals_query.list_professionals().await?;

    Ok(web::Json(
        response
            .professionals
            .into_iter()
            .map(ProfessionalResponseBody::from)
            .collect(),
    ))
}

/// Fetch a professional by id.
#[utoipa::path(
    get,
    path = "/api/v1/professionals/{professionalId}",
    params(("professionalId" = String, Path, format = "uuid", description = "Professional identifier")),
    responses(
        (status = 200, description = "Professional", body = ProfessionalResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["professionals"],
    operation_id = "getProfessional",
    security(("SessionCookie" = []))
)]
#[get("/professionals/{professionalId}")]
pub async fn get_professional(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfessionalResponseBody>> {
    session.require_user_id()?;
    let professional_id = parse_uuid(path.into_inner(), FieldName::new("professionalId"))?;

    let response = state
        .professionals_query
        .get_professional(GetProfessionalRequest { professional_id })
        .await?;

    Ok(web::Json(ProfessionalResponseBody::from(
        response.professional,
    )))
}

/// Fetch the professional profile owned by a user account.
#[utoipa::path(
    get,
    path = "/api/v1/professionals/user/{userId}",
    params(("userId" = String, Path, format = "uuid", description = "Owning user account")),
    responses(
        (status = 200, description = "Professional", body = ProfessionalResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["professionals"],
    operation_id = "getProfessionalForUser",
    security(("SessionCookie" = []))
)]
#[get("/professionals/user/{userId}")]
pub async fn get_professional_for_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfessionalResponseBody>> {
    session.require_user_id()?;
    let user_id = parse_uuid(path.into_inner(), FieldName::new("userId"))?;

    let response = state
        .professionals_query
        .get_professional_for_user(GetProfessionalForUserRequest { user_id })
        .await?;

    Ok(web::Json(ProfessionalResponseBody::from(
        response.professional,
    )))
}

#[cfg(test)]
#[path = "professionals_tests.rs"]
mod tests;
