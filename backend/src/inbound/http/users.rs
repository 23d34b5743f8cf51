//! Identity HTTP handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! GET /api/v1/users
//! GET /api/v1/users/{id}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_uuid_error};

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"admin","password":"password"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Response payload for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseBody {
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// User account payload returned by the users endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponseBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            username: value.username().to_string(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a user and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent error
/// schema across all endpoints. On success the authenticated user id is
/// persisted in the session cookie and echoed in the body.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponseBody, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponseBody>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(web::Json(LoginResponseBody {
        user_id: user_id.to_string(),
    }))
}

/// List registered user accounts.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::users::{list_users, login};
///
/// let app = App::new().service(web::scope("/api/v1").service(login).service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security(("SessionCookie" = []))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    session.require_user_id()?;
    let users = state.users.list_users().await?;
    Ok(web::Json(
        users.into_iter().map(UserResponseBody::from).collect(),
    ))
}

/// Fetch a single user account by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, format = "uuid", description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security(("SessionCookie" = []))
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    session.require_user_id()?;
    let raw = path.into_inner();
    let id = UserId::new(&raw).map_err(|_| invalid_uuid_error(FieldName::new("id"), &raw))?;
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
