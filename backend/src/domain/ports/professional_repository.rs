//! Port for professional profile persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Professional;

use super::define_port_error;

define_port_error! {
    /// Errors raised by professional repository adapters.
    pub enum ProfessionalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "professional repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "professional repository query failed: {message}",
    }
}

/// Port for writing and reading professional profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    /// Persist a professional profile.
    async fn save(&self, professional: &Professional) -> Result<(), ProfessionalRepositoryError>;

    /// Find a professional by id.
    async fn find_by_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Option<Professional>, ProfessionalRepositoryError>;

    /// Find the professional profile owned by a user account.
    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<Professional>, ProfessionalRepositoryError>;

    /// Read every professional profile.
    async fn list_all(&self) -> Result<Vec<Professional>, ProfessionalRepositoryError>;
}

/// Fixture implementation for tests that do not exercise professional
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfessionalRepository;

#[async_trait]
impl ProfessionalRepository for FixtureProfessionalRepository {
    async fn save(&self, _professional: &Professional) -> Result<(), ProfessionalRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _professional_id: &Uuid,
    ) -> Result<Option<Professional>, ProfessionalRepositoryError> {
        Ok(None)
    }

    async fn find_by_user_id(
        &self,
        _user_id: &Uuid,
    ) -> Result<Option<Professional>, ProfessionalRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Professional>, ProfessionalRepositoryError> {
        Ok(Vec::new())
    }
}
