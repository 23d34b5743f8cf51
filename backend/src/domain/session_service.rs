//! Clinical session domain services.
//!
//! These services implement the session driving ports for scheduling
//! appointments, appending notes, and reading sessions back by id, treating
//! professional, or owning treatment plan.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AddNoteRequest, AddNoteResponse, CreateSessionRequest, CreateSessionResponse,
    GetSessionRequest, GetSessionResponse, ListNotesRequest, ListNotesResponse,
    ListSessionsForProfessionalRequest, ListSessionsForTreatmentPlanRequest, ListSessionsResponse,
    NotePayload, SessionCommand, SessionPayload, SessionQuery, SessionRepository,
    SessionRepositoryError, unknown_session_error,
};
use crate::domain::{Error, Note};

fn map_repository_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
    }
}

/// Session service implementing the command driving port.
#[derive(Clone)]
pub struct SessionCommandService<R> {
    session_repo: Arc<R>,
}

impl<R> SessionCommandService<R> {
    /// Create a new command service with the session repository.
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }
}

#[async_trait]
impl<R> SessionCommand for SessionCommandService<R>
where
    R: SessionRepository,
{
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, Error> {
        let session = request.session.into_entity(Uuid::new_v4());

        self.session_repo
            .save(&session)
            .await
            .map_err(map_repository_error)?;

        Ok(CreateSessionResponse {
            session: session.into(),
        })
    }

    async fn add_note(&self, request: AddNoteRequest) -> Result<AddNoteResponse, Error> {
        let session = self
            .session_repo
            .find_by_id(&request.session_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_session_error(request.session_id))?;

        let note = Note::new(Uuid::new_v4(), session.id(), &request.note.content)
            .map_err(|err| Error::invalid_request(format!("invalid note payload: {err}")))?;

        self.session_repo
            .add_note(&note)
            .await
            .map_err(map_repository_error)?;

        Ok(AddNoteResponse {
            session: session.into(),
        })
    }
}

/// Session service implementing the query driving port.
#[derive(Clone)]
pub struct SessionQueryService<R> {
    session_repo: Arc<R>,
}

impl<R> SessionQueryService<R> {
    /// Create a new query service with the session repository.
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }
}

#[async_trait]
impl<R> SessionQuery for SessionQueryService<R>
where
    R: SessionRepository,
{
    async fn get_session(&self, request: GetSessionRequest) -> Result<GetSessionResponse, Error> {
        let session = self
            .session_repo
            .find_by_id(&request.session_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_session_error(request.session_id))?;

        Ok(GetSessionResponse {
            session: session.into(),
        })
    }

    async fn list_sessions_for_professional(
        &self,
        request: ListSessionsForProfessionalRequest,
    ) -> Result<ListSessionsResponse, Error> {
        let sessions = self
            .session_repo
            .list_by_professional_id(&request.professional_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListSessionsResponse {
            sessions: sessions.into_iter().map(SessionPayload::from).collect(),
        })
    }

    async fn list_sessions_for_treatment_plan(
        &self,
        request: ListSessionsForTreatmentPlanRequest,
    ) -> Result<ListSessionsResponse, Error> {
        let sessions = self
            .session_repo
            .list_by_treatment_plan_id(&request.treatment_plan_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListSessionsResponse {
            sessions: sessions.into_iter().map(SessionPayload::from).collect(),
        })
    }

    async fn list_notes(&self, request: ListNotesRequest) -> Result<ListNotesResponse, Error> {
        let notes = self
            .session_repo
            .list_notes(&request.session_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListNotesResponse {
            notes: notes.into_iter().map(NotePayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
