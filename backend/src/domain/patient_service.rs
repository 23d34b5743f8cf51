//! Patient profile domain services.
//!
//! These services implement the patient driving ports for registering
//! profiles and resolving them by id, owning user, or assigned professional.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    CreatePatientRequest, CreatePatientResponse, GetPatientForUserRequest, GetPatientRequest,
    GetPatientResponse, ListPatientsForProfessionalRequest, ListPatientsResponse, PatientCommand,
    PatientPayload, PatientQuery, PatientRepository, PatientRepositoryError,
    unknown_patient_error,
};

fn map_repository_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patient repository unavailable: {message}"))
        }
        PatientRepositoryError::Query { message } => {
            Error::internal(format!("patient repository error: {message}"))
        }
    }
}

/// Patient service implementing the command driving port.
#[derive(Clone)]
pub struct PatientCommandService<R> {
    patient_repo: Arc<R>,
}

impl<R> PatientCommandService<R> {
    /// Create a new command service with the patient repository.
    pub fn new(patient_repo: Arc<R>) -> Self {
        Self { patient_repo }
    }
}

#[async_trait]
impl<R> PatientCommand for PatientCommandService<R>
where
    R: PatientRepository,
{
    async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<CreatePatientResponse, Error> {
        let patient = request
            .patient
            .into_entity(Uuid::new_v4())
            .map_err(|err| Error::invalid_request(format!("invalid patient payload: {err}")))?;

        self.patient_repo
            .save(&patient)
            .await
            .map_err(map_repository_error)?;

        Ok(CreatePatientResponse {
            patient: patient.into(),
        })
    }
}

/// Patient service implementing the query driving port.
#[derive(Clone)]
pub struct PatientQueryService<R> {
    patient_repo: Arc<R>,
}

impl<R> PatientQueryService<R> {
    /// Create a new query service with the patient repository.
    pub fn new(patient_repo: Arc<R>) -> Self {
        Self { patient_repo }
    }
}

#[async_trait]
impl<R> PatientQuery for PatientQueryService<R>
where
    R: PatientRepository,
{
    async fn get_patient(&self, request: GetPatientRequest) -> Result<GetPatientResponse, Error> {
        let patient = self
            .patient_repo
            .find_by_id(&request.patient_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_patient_error("patientId", request.patient_id))?;

        Ok(GetPatientResponse {
            patient: patient.into(),
        })
    }

    async fn get_patient_for_user(
        &self,
        request: GetPatientForUserRequest,
    ) -> Result<GetPatientResponse, Error> {
        let patient = self
            .patient_repo
            .find_by_user_id(&request.user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_patient_error("userId", request.user_id))?;

        Ok(GetPatientResponse {
            patient: patient.into(),
        })
    }

    async fn list_patients_for_professional(
        &self,
        request: ListPatientsForProfessionalRequest,
    ) -> Result<ListPatientsResponse, Error> {
        let patients = self
            .patient_repo
            .list_by_professional_id(&request.professional_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListPatientsResponse {
            patients: patients.into_iter().map(PatientPayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "patient_service_tests.rs"]
mod tests;
