//! Prescription domain services.
//!
//! The command service holds two repositories: prescriptions for its own
//! aggregate and treatment plans to verify a binding target exists before a
//! bound prescription is written.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AddPillRequest, AddPillResponse, CreatePrescriptionRequest, CreatePrescriptionResponse,
    GetPrescriptionRequest, GetPrescriptionResponse, ListPrescriptionsForPatientRequest,
    ListPrescriptionsForProfessionalRequest, ListPrescriptionsForTreatmentPlanRequest,
    ListPrescriptionsResponse, PrescriptionCommand, PrescriptionPayload, PrescriptionQuery,
    PrescriptionRepository, PrescriptionRepositoryError, TreatmentPlanRepository,
    TreatmentPlanRepositoryError, unknown_prescription_error, unknown_treatment_plan_error,
};
use crate::domain::{Error, Pill};

fn map_repository_error(error: PrescriptionRepositoryError) -> Error {
    match error {
        PrescriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("prescription repository unavailable: {message}"))
        }
        PrescriptionRepositoryError::Query { message } => {
            Error::internal(format!("prescription repository error: {message}"))
        }
    }
}

fn map_plan_repository_error(error: TreatmentPlanRepositoryError) -> Error {
    match error {
        TreatmentPlanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("treatment plan repository unavailable: {message}"))
        }
        TreatmentPlanRepositoryError::Query { message } => {
            Error::internal(format!("treatment plan repository error: {message}"))
        }
    }
}

/// Prescription service implementing the command driving port.
#[derive(Clone)]
pub struct PrescriptionCommandService<R, P> {
    prescription_repo: Arc<R>,
    plan_repo: Arc<P>,
}

impl<R, P> PrescriptionCommandService<R, P> {
    /// Create a new command service with the prescription and treatment plan
    /// repositories.
    pub fn new(prescription_repo: Arc<R>, plan_repo: Arc<P>) -> Self {
        Self {
            prescription_repo,
            plan_repo,
        }
    }
}

#[async_trait]
impl<R, P> PrescriptionCommand for PrescriptionCommandService<R, P>
where
    R: PrescriptionRepository,
    P: TreatmentPlanRepository,
{
    async fn create_prescription(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<CreatePrescriptionResponse, Error> {
        if let Some(plan_id) = request.treatment_plan_id {
            self.plan_repo
                .find_by_id(&plan_id)
                .await
                .map_err(map_plan_repository_error)?
                .ok_or_else(|| unknown_treatment_plan_error("treatmentId", plan_id))?;
        }

        let prescription = request
            .prescription
            .into_entity(Uuid::new_v4(), request.treatment_plan_id)
            .map_err(|err| {
                Error::invalid_request(format!("invalid prescription payload: {err}"))
            })?;

        self.prescription_repo
            .save(&prescription)
            .await
            .map_err(map_repository_error)?;

        Ok(CreatePrescriptionResponse {
            prescription: prescription.into(),
        })
    }

    async fn add_pill(&self, request: AddPillRequest) -> Result<AddPillResponse, Error> {
        let prescription = self
            .prescription_repo
            .find_by_id(&request.prescription_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_prescription_error(request.prescription_id))?;

        let pill = Pill::try_from(request.pill)
            .map_err(|err| Error::invalid_request(format!("invalid pill payload: {err}")))?;
        let updated = prescription.with_pill(pill);

        self.prescription_repo
            .save(&updated)
            .await
            .map_err(map_repository_error)?;

        Ok(AddPillResponse {
            prescription: updated.into(),
        })
    }
}

/// Prescription service implementing the query driving port.
#[derive(Clone)]
pub struct PrescriptionQueryService<R> {
    prescription_repo: Arc<R>,
}

impl<R> PrescriptionQueryService<R> {
    /// Create a new query service with the prescription repository.
    pub fn new(prescription_repo: Arc<R>) -> Self {
        Self { prescription_repo }
    }
}

#[async_trait]
impl<R> PrescriptionQuery for PrescriptionQueryService<R>
where
    R: PrescriptionRepository,
{
    async fn get_prescription(
        &self,
        request: GetPrescriptionRequest,
    ) -> Result<GetPrescriptionResponse, Error> {
        let prescription = self
            .prescription_repo
            .find_by_id(&request.prescription_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_prescription_error(request.prescription_id))?;

        Ok(GetPrescriptionResponse {
            prescription: prescription.into(),
        })
    }

    async fn list_prescriptions_for_treatment_plan(
        &self,
        request: ListPrescriptionsForTreatmentPlanRequest,
    ) -> Result<ListPrescriptionsResponse, Error> {
        let prescriptions = self
            .prescription_repo
            .list_by_treatment_plan_id(&request.treatment_plan_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListPrescriptionsResponse {
            prescriptions: prescriptions
                .into_iter()
                .map(PrescriptionPayload::from)
                .collect(),
        })
    }

    async fn list_prescriptions_for_professional(
        &self,
        request: ListPrescriptionsForProfessionalRequest,
    ) -> Result<ListPrescriptionsResponse, Error> {
        let prescriptions = self
            .prescription_repo
            .list_by_professional_id(&request.professional_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListPrescriptionsResponse {
            prescriptions: prescriptions
                .into_iter()
                .map(PrescriptionPayload::from)
                .collect(),
        })
    }

    async fn list_prescriptions_for_patient(
        &self,
        request: ListPrescriptionsForPatientRequest,
    ) -> Result<ListPrescriptionsResponse, Error> {
        let prescriptions = self
            .prescription_repo
            .list_by_patient_id(&request.patient_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListPrescriptionsResponse {
            prescriptions: prescriptions
                .into_iter()
                .map(PrescriptionPayload::from)
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "prescription_service_tests.rs"]
mod tests;
