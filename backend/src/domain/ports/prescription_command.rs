//! Driving port for prescription mutations.
//!
//! Prescriptions are created with an empty pill list, optionally bound to a
//! treatment plan; pills append to an existing prescription and the updated
//! resource is echoed back.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Error, Pill, PillDraft, Prescription, PrescriptionDraft, PrescriptionValidationError,
};

use super::treatment_plan_command::unknown_treatment_plan_error;

/// Build the structured error for a lookup that matched no prescription.
pub(crate) fn unknown_prescription_error(value: Uuid) -> Error {
    Error::invalid_request("prescription not found").with_details(json!({
        "field": "prescriptionId",
        "value": value.to_string(),
        "code": "unknown_prescription",
    }))
}

/// Serializable prescription payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionPayload {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub treatment_plan_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pills: Vec<PillDraft>,
}

impl TryFrom<PrescriptionPayload> for Prescription {
    type Error = PrescriptionValidationError;

    fn try_from(value: PrescriptionPayload) -> Result<Self, Self::Error> {
        let pills = value
            .pills
            .into_iter()
            .map(Pill::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Prescription::new(PrescriptionDraft {
            id: value.id,
            patient_id: value.patient_id,
            professional_id: value.professional_id,
            treatment_plan_id: value.treatment_plan_id,
            start_date: value.start_date,
            end_date: value.end_date,
            pills,
        })
    }
}

impl From<Prescription> for PrescriptionPayload {
    fn from(value: Prescription) -> Self {
        Self {
            id: value.id(),
            patient_id: value.patient_id(),
            professional_id: value.professional_id(),
            treatment_plan_id: value.treatment_plan_id(),
            start_date: value.start_date(),
            end_date: value.end_date(),
            pills: value
                .pills()
                .iter()
                .map(|pill| PillDraft {
                    name: pill.name().to_owned(),
                    description: pill.description().to_owned(),
                })
                .collect(),
        }
    }
}

/// Fields accepted when issuing a prescription; the server mints the id and
/// pills start empty. A treatment plan binding, when present, comes from the
/// request path rather than the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraftPayload {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PrescriptionDraftPayload {
    /// Build the domain entity under a minted id with an empty pill list.
    pub(crate) fn into_entity(
        self,
        id: Uuid,
        treatment_plan_id: Option<Uuid>,
    ) -> Result<Prescription, PrescriptionValidationError> {
        Prescription::new(PrescriptionDraft {
            id,
            patient_id: self.patient_id,
            professional_id: self.professional_id,
            treatment_plan_id,
            start_date: self.start_date,
            end_date: self.end_date,
            pills: Vec::new(),
        })
    }
}

/// Request to issue a prescription, optionally bound to a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    pub prescription: PrescriptionDraftPayload,
    pub treatment_plan_id: Option<Uuid>,
}

/// Response from issuing a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionResponse {
    pub prescription: PrescriptionPayload,
}

/// Request to append a pill to an existing prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPillRequest {
    pub prescription_id: Uuid,
    pub pill: PillDraft,
}

/// Response from appending a pill: the updated prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPillResponse {
    pub prescription: PrescriptionPayload,
}

/// Driving port for prescription write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrescriptionCommand: Send + Sync {
    /// Issues a prescription and returns the stored resource.
    ///
    /// A `treatment_plan_id` that matches no plan yields an
    /// `invalid_request` error with an `unknown_treatment_plan` detail code.
    async fn create_prescription(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<CreatePrescriptionResponse, Error>;

    /// Appends a pill to an existing prescription and returns the updated
    /// resource with the pill present.
    async fn add_pill(&self, request: AddPillRequest) -> Result<AddPillResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Unbound creates echo the draft with a minted id; binding to a plan or
/// appending a pill reports the referenced aggregate as unknown because
/// nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrescriptionCommand;

#[async_trait]
impl PrescriptionCommand for FixturePrescriptionCommand {
    async fn create_prescription(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<CreatePrescriptionResponse, Error> {
        if let Some(plan_id) = request.treatment_plan_id {
            return Err(unknown_treatment_plan_error("treatmentId", plan_id));
        }

        let prescription = request
            .prescription
            .into_entity(Uuid::new_v4(), None)
            .map_err(|err| {
                Error::invalid_request(format!("invalid prescription payload: {err}"))
            })?;

        Ok(CreatePrescriptionResponse {
            prescription: prescription.into(),
        })
    }

    async fn add_pill(&self, request: AddPillRequest) -> Result<AddPillResponse, Error> {
        Err(unknown_prescription_error(request.prescription_id))
    }
}
