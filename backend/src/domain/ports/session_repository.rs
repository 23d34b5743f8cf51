//! Port for clinical session and note persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Note, Session};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "session repository query failed: {message}",
    }
}

/// Port for writing sessions and their append-only notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a session.
    async fn save(&self, session: &Session) -> Result<(), SessionRepositoryError>;

    /// Find a session by id.
    async fn find_by_id(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<Session>, SessionRepositoryError>;

    /// Read the sessions led by a professional.
    async fn list_by_professional_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError>;

    /// Read the sessions attached to a treatment plan.
    async fn list_by_treatment_plan_id(
        &self,
        treatment_plan_id: &Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError>;

    /// Append a note to its session.
    async fn add_note(&self, note: &Note) -> Result<(), SessionRepositoryError>;

    /// Read the notes of a session in append order.
    async fn list_notes(&self, session_id: &Uuid) -> Result<Vec<Note>, SessionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise session persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionRepository;

#[async_trait]
impl SessionRepository for FixtureSessionRepository {
    async fn save(&self, _session: &Session) -> Result<(), SessionRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _session_id: &Uuid,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        Ok(None)
    }

    async fn list_by_professional_id(
        &self,
        _professional_id: &Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_treatment_plan_id(
        &self,
        _treatment_plan_id: &Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        Ok(Vec::new())
    }

    async fn add_note(&self, _note: &Note) -> Result<(), SessionRepositoryError> {
        Ok(())
    }

    async fn list_notes(&self, _session_id: &Uuid) -> Result<Vec<Note>, SessionRepositoryError> {
        Ok(Vec::new())
    }
}
