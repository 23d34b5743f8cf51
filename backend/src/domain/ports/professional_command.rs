//! Driving port for professional profile registration.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Error, Professional, ProfessionalDraft, ProfileDetailsDraft, ProfileValidationError,
};

/// Serializable professional payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalPayload {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub user_id: Uuid,
}

impl TryFrom<ProfessionalPayload> for Professional {
    type Error = ProfileValidationError;

    fn try_from(value: ProfessionalPayload) -> Result<Self, Self::Error> {
        Professional::new(ProfessionalDraft {
            id: value.id,
            details: ProfileDetailsDraft {
                full_name: value.full_name,
                email: value.email,
                phone: value.phone,
                birth_date: value.birth_date,
                user_id: value.user_id,
            },
        })
    }
}

impl From<Professional> for ProfessionalPayload {
    fn from(value: Professional) -> Self {
        Self {
            id: value.id(),
            full_name: value.details().full_name().to_owned(),
            email: value.details().email().to_owned(),
            phone: value.details().phone().to_owned(),
            birth_date: value.details().birth_date(),
            user_id: value.details().user_id(),
        }
    }
}

/// Fields accepted when registering a professional; the server mints the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalDraftPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub user_id: Uuid,
}

impl ProfessionalDraftPayload {
    /// Build the domain entity under a minted id.
    pub(crate) fn into_entity(self, id: Uuid) -> Result<Professional, ProfileValidationError> {
        Professional::new(ProfessionalDraft {
            id,
            details: ProfileDetailsDraft {
                full_name: self.full_name,
                email: self.email,
                phone: self.phone,
                birth_date: self.birth_date,
                user_id: self.user_id,
            },
        })
    }
}

/// Request to register a professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalRequest {
    pub professional: ProfessionalDraftPayload,
}

/// Response from registering a professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalResponse {
    pub professional: ProfessionalPayload,
}

/// Driving port for professional write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalCommand: Send + Sync {
    /// Registers a professional and returns the stored resource.
    async fn create_professional(
        &self,
        request: CreateProfessionalRequest,
    ) -> Result<CreateProfessionalResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfessionalCommand;

#[async_trait]
impl ProfessionalCommand for FixtureProfessionalCommand {
    async fn create_professional(
        &self,
        request: CreateProfessionalRequest,
    ) -> Result<CreateProfessionalResponse, Error> {
        let professional = request
            .professional
            .into_entity(Uuid::new_v4())
            .map_err(|err| {
                Error::invalid_request(format!("invalid professional payload: {err}"))
            })?;

        Ok(CreateProfessionalResponse {
            professional: professional.into(),
        })
    }
}
