//! Port for patient profile persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Patient;

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "patient repository query failed: {message}",
    }
}

/// Port for writing and reading patient profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Persist a patient profile.
    async fn save(&self, patient: &Patient) -> Result<(), PatientRepositoryError>;

    /// Find a patient by id.
    async fn find_by_id(
        &self,
        patient_id: &Uuid,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Find the patient profile owned by a user account.
    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Read the patients assigned to a professional.
    async fn list_by_professional_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Vec<Patient>, PatientRepositoryError>;
}

/// Fixture implementation for tests that do not exercise patient persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientRepository;

#[async_trait]
impl PatientRepository for FixturePatientRepository {
    async fn save(&self, _patient: &Patient) -> Result<(), PatientRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _patient_id: &Uuid,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(None)
    }

    async fn find_by_user_id(
        &self,
        _user_id: &Uuid,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(None)
    }

    async fn list_by_professional_id(
        &self,
        _professional_id: &Uuid,
    ) -> Result<Vec<Patient>, PatientRepositoryError> {
        Ok(Vec::new())
    }
}
