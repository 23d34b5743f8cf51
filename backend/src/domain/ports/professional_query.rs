//! Driving port for professional profile reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

use super::professional_command::ProfessionalPayload;

/// Build the structured error for a lookup that matched no professional.
pub(crate) fn unknown_professional_error(field: &'static str, value: Uuid) -> Error {
    Error::invalid_request("professional not found").with_details(json!({
        "field": field,
        "value": value.to_string(),
        "code": "unknown_professional",
    }))
}

/// Request to fetch one professional by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfessionalRequest {
    pub professional_id: Uuid,
}

/// Request to fetch the professional profile owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfessionalForUserRequest {
    pub user_id: Uuid,
}

/// Response for a single professional lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfessionalResponse {
    pub professional: ProfessionalPayload,
}

/// Response containing professional profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProfessionalsResponse {
    pub professionals: Vec<ProfessionalPayload>,
}

/// Driving port for professional read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalQuery: Send + Sync {
    /// Fetches one professional by identifier.
    ///
    /// An id that matches no professional yields an `invalid_request` error
    /// with an `unknown_professional` detail code.
    async fn get_professional(
        &self,
        request: GetProfessionalRequest,
    ) -> Result<GetProfessionalResponse, Error>;

    /// Fetches the single professional profile owned by a user account.
    async fn get_professional_for_user(
        &self,
        request: GetProfessionalForUserRequest,
    ) -> Result<GetProfessionalResponse, Error>;

    /// Lists every registered professional.
    async fn list_professionals(&self) -> Result<ListProfessionalsResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfessionalQuery;

#[async_trait]
impl ProfessionalQuery for FixtureProfessionalQuery {
    async fn get_professional(
        &self,
        request: GetProfessionalRequest,
    ) -> Result<GetProfessionalResponse, Error> {
        Err(unknown_professional_error(
            "professionalId",
            request.professional_id,
        ))
    }

    async fn get_professional_for_user(
        &self,
        request: GetProfessionalForUserRequest,
    ) -> Result<GetProfessionalResponse, Error> {
        Err(unknown_professional_error("userId", request.user_id))
    }

    async fn list_professionals(&self) -> Result<ListProfessionalsResponse, Error> {
        Ok(ListProfessionalsResponse {
            professionals: Vec::new(),
        })
    }
}
