//! Driving port for patient profile registration.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Patient, PatientDraft, ProfileDetailsDraft, ProfileValidationError};

/// Serializable patient payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub user_id: Uuid,
    pub professional_id: Uuid,
    pub clinical_history_status: bool,
}

impl TryFrom<PatientPayload> for Patient {
    type Error = ProfileValidationError;

    fn try_from(value: PatientPayload) -> Result<Self, Self::Error> {
        Patient::new(PatientDraft {
            id: value.id,
            details: ProfileDetailsDraft {
                full_name: value.full_name,
                email: value.email,
                phone: value.phone,
                birth_date: value.birth_date,
                user_id: value.user_id,
            },
            professional_id: value.professional_id,
            clinical_history_status: value.clinical_history_status,
        })
    }
}

impl From<Patient> for PatientPayload {
    fn from(value: Patient) -> Self {
        Self {
            id: value.id(),
            full_name: value.details().full_name().to_owned(),
            email: value.details().email().to_owned(),
            phone: value.details().phone().to_owned(),
            birth_date: value.details().birth_date(),
            user_id: value.details().user_id(),
            professional_id: value.professional_id(),
            clinical_history_status: value.clinical_history_status(),
        }
    }
}

/// Fields accepted when registering a patient; the server mints the id.
///
/// `clinical_history_status` is tolerated on input for wire compatibility but
/// ignored: new registrations always start with the flag unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraftPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub user_id: Uuid,
    pub professional_id: Uuid,
    #[serde(default)]
    pub clinical_history_status: bool,
}

impl PatientDraftPayload {
    /// Build the domain entity under a minted id, discarding any submitted
    /// history flag.
    pub(crate) fn into_entity(self, id: Uuid) -> Result<Patient, ProfileValidationError> {
        Patient::new(PatientDraft {
            id,
            details: ProfileDetailsDraft {
                full_name: self.full_name,
                email: self.email,
                phone: self.phone,
                birth_date: self.birth_date,
                user_id: self.user_id,
            },
            professional_id: self.professional_id,
            clinical_history_status: false,
        })
    }
}

/// Request to register a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub patient: PatientDraftPayload,
}

/// Response from registering a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientResponse {
    pub patient: PatientPayload,
}

/// Driving port for patient write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientCommand: Send + Sync {
    /// Registers a patient and returns the stored resource.
    ///
    /// The returned payload carries the minted id and the forced-false
    /// `clinical_history_status`.
    async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<CreatePatientResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientCommand;

#[async_trait]
impl PatientCommand for FixturePatientCommand {
    async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<CreatePatientResponse, Error> {
        let patient = request
            .patient
            .into_entity(Uuid::new_v4())
            .map_err(|err| Error::invalid_request(format!("invalid patient payload: {err}")))?;

        Ok(CreatePatientResponse {
            patient: patient.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft_payload() -> PatientDraftPayload {
        PatientDraftPayload {
            full_name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: "+44 20 7946 0123".to_owned(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid fixture date"),
            user_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            clinical_history_status: true,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_mints_an_id_and_clears_the_history_flag(
        draft_payload: PatientDraftPayload,
    ) {
        let command = FixturePatientCommand;
        let request = CreatePatientRequest {
            patient: draft_payload.clone(),
        };

        let response = command
            .create_patient(request)
            .await
            .expect("fixture create succeeds");

        assert_eq!(response.patient.full_name, draft_payload.full_name);
        assert_eq!(response.patient.user_id, draft_payload.user_id);
        assert!(!response.patient.clinical_history_status);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_rejects_invalid_details(mut draft_payload: PatientDraftPayload) {
        draft_payload.email = "not-an-email".to_owned();
        let command = FixturePatientCommand;

        let err = command
            .create_patient(CreatePatientRequest {
                patient: draft_payload,
            })
            .await
            .expect_err("malformed email must fail");

        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn payload_round_trip_through_domain_entity(draft_payload: PatientDraftPayload) {
        let payload = PatientPayload {
            id: Uuid::new_v4(),
            full_name: draft_payload.full_name,
            email: draft_payload.email,
            phone: draft_payload.phone,
            birth_date: draft_payload.birth_date,
            user_id: draft_payload.user_id,
            professional_id: draft_payload.professional_id,
            clinical_history_status: false,
        };

        let patient = Patient::try_from(payload.clone()).expect("valid patient payload");
        let restored = PatientPayload::from(patient);

        assert_eq!(restored, payload);
    }
}
