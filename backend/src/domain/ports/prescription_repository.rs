//! Port for prescription persistence.
//!
//! Saving is an upsert so pill appends reuse the same write path as creation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Prescription;

use super::define_port_error;

define_port_error! {
    /// Errors raised by prescription repository adapters.
    pub enum PrescriptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "prescription repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "prescription repository query failed: {message}",
    }
}

/// Port for writing and reading prescriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    /// Persist a prescription, replacing any stored pills with the given set.
    async fn save(&self, prescription: &Prescription) -> Result<(), PrescriptionRepositoryError>;

    /// Find a prescription by id.
    async fn find_by_id(
        &self,
        prescription_id: &Uuid,
    ) -> Result<Option<Prescription>, PrescriptionRepositoryError>;

    /// Read the prescriptions bound to a treatment plan.
    async fn list_by_treatment_plan_id(
        &self,
        treatment_plan_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError>;

    /// Read the prescriptions issued by a professional.
    async fn list_by_professional_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError>;

    /// Read the prescriptions issued to a patient.
    async fn list_by_patient_id(
        &self,
        patient_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise prescription
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrescriptionRepository;

#[async_trait]
impl PrescriptionRepository for FixturePrescriptionRepository {
    async fn save(&self, _prescription: &Prescription) -> Result<(), PrescriptionRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _prescription_id: &Uuid,
    ) -> Result<Option<Prescription>, PrescriptionRepositoryError> {
        Ok(None)
    }

    async fn list_by_treatment_plan_id(
        &self,
        _treatment_plan_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_professional_id(
        &self,
        _professional_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_patient_id(
        &self,
        _patient_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError> {
        Ok(Vec::new())
    }
}
