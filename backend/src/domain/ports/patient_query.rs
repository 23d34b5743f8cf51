//! Driving port for patient profile reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

use super::patient_command::PatientPayload;

/// Build the structured error for a lookup that matched no patient.
pub(crate) fn unknown_patient_error(field: &'static str, value: Uuid) -> Error {
    Error::invalid_request("patient not found").with_details(json!({
        "field": field,
        "value": value.to_string(),
        "code": "unknown_patient",
    }))
}

/// Request to fetch one patient by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPatientRequest {
    pub patient_id: Uuid,
}

/// Request to fetch the patient profile owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPatientForUserRequest {
    pub user_id: Uuid,
}

/// Response for a single patient lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPatientResponse {
    pub patient: PatientPayload,
}

/// Request to list the patients assigned to a professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatientsForProfessionalRequest {
    pub professional_id: Uuid,
}

/// Response containing patient profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatientsResponse {
    pub patients: Vec<PatientPayload>,
}

/// Driving port for patient read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientQuery: Send + Sync {
    /// Fetches one patient by identifier.
    ///
    /// An id that matches no patient yields an `invalid_request` error with
    /// an `unknown_patient` detail code.
    async fn get_patient(&self, request: GetPatientRequest) -> Result<GetPatientResponse, Error>;

    /// Fetches the single patient profile owned by a user account.
    async fn get_patient_for_user(
        &self,
        request: GetPatientForUserRequest,
    ) -> Result<GetPatientResponse, Error>;

    /// Lists the patients assigned to a professional; absent professionals
    /// simply produce an empty list.
    async fn list_patients_for_professional(
        &self,
        request: ListPatientsForProfessionalRequest,
    ) -> Result<ListPatientsResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientQuery;

#[async_trait]
impl PatientQuery for FixturePatientQuery {
    async fn get_patient(&self, request: GetPatientRequest) -> Result<GetPatientResponse, Error> {
        Err(unknown_patient_error("patientId", request.patient_id))
    }

    async fn get_patient_for_user(
        &self,
        request: GetPatientForUserRequest,
    ) -> Result<GetPatientResponse, Error> {
        Err(unknown_patient_error("userId", request.user_id))
    }

    async fn list_patients_for_professional(
        &self,
        _request: ListPatientsForProfessionalRequest,
    ) -> Result<ListPatientsResponse, Error> {
        Ok(ListPatientsResponse {
            patients: Vec::new(),
        })
    }
}
