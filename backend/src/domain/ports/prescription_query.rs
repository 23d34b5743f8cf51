//! Driving port for prescription reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

use super::prescription_command::{PrescriptionPayload, unknown_prescription_error};

/// Request to fetch one prescription by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPrescriptionRequest {
    pub prescription_id: Uuid,
}

/// Response for a single prescription lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPrescriptionResponse {
    pub prescription: PrescriptionPayload,
}

/// Request to list the prescriptions bound to a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrescriptionsForTreatmentPlanRequest {
    pub treatment_plan_id: Uuid,
}

/// Request to list the prescriptions issued by a professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrescriptionsForProfessionalRequest {
    pub professional_id: Uuid,
}

/// Request to list the prescriptions issued to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrescriptionsForPatientRequest {
    pub patient_id: Uuid,
}

/// Response containing prescriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrescriptionsResponse {
    pub prescriptions: Vec<PrescriptionPayload>,
}

/// Driving port for prescription read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrescriptionQuery: Send + Sync {
    /// Fetches one prescription by identifier.
    ///
    /// An id that matches no prescription yields an `invalid_request` error
    /// with an `unknown_prescription` detail code.
    async fn get_prescription(
        &self,
        request: GetPrescriptionRequest,
    ) -> Result<GetPrescriptionResponse, Error>;

    /// Lists the prescriptions bound to a treatment plan.
    async fn list_prescriptions_for_treatment_plan(
        &self,
        request: ListPrescriptionsForTreatmentPlanRequest,
    ) -> Result<ListPrescriptionsResponse, Error>;

    /// Lists the prescriptions issued by a professional.
    async fn list_prescriptions_for_professional(
        &self,
        request: ListPrescriptionsForProfessionalRequest,
    ) -> Result<ListPrescriptionsResponse, Error>;

    /// Lists the prescriptions issued to a patient.
    async fn list_prescriptions_for_patient(
        &self,
        request: ListPrescriptionsForPatientRequest,
    ) -> Result<ListPrescriptionsResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrescriptionQuery;

#[async_trait]
impl PrescriptionQuery for FixturePrescriptionQuery {
    async fn get_prescription(
        &self,
        request: GetPrescriptionRequest,
    ) -> Result<GetPrescriptionResponse, Error> {
        Err(unknown_prescription_error(request.prescription_id))
    }

    async fn list_prescriptions_for_treatment_plan(
        &self,
        _request: ListPrescriptionsForTreatmentPlanRequest,
    ) -> Result<ListPrescriptionsResponse, Error> {
        Ok(ListPrescriptionsResponse {
            prescriptions: Vec::new(),
        })
    }

    async fn list_prescriptions_for_professional(
        &self,
        _request: ListPrescriptionsForProfessionalRequest,
    ) -> Result<ListPrescriptionsResponse, Error> {
        Ok(ListPrescriptionsResponse {
            prescriptions: Vec::new(),
        })
    }

    async fn list_prescriptions_for_patient(
        &self,
        _request: ListPrescriptionsForPatientRequest,
    ) -> Result<ListPrescriptionsResponse, Error> {
        Ok(ListPrescriptionsResponse {
            prescriptions: Vec::new(),
        })
    }
}
