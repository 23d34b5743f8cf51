//! Driving port for clinical session reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

use super::session_command::{NotePayload, SessionPayload, unknown_session_error};

/// Request to fetch one session by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSessionRequest {
    pub session_id: Uuid,
}

/// Response for a single session lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSessionResponse {
    pub session: SessionPayload,
}

/// Request to list the sessions led by a professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsForProfessionalRequest {
    pub professional_id: Uuid,
}

/// Request to list the sessions attached to a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsForTreatmentPlanRequest {
    pub treatment_plan_id: Uuid,
}

/// Response containing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsResponse {
    pub sessions: Vec<SessionPayload>,
}

/// Request to list the notes of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesRequest {
    pub session_id: Uuid,
}

/// Response containing session notes in append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesResponse {
    pub notes: Vec<NotePayload>,
}

/// Driving port for clinical session read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionQuery: Send + Sync {
    /// Fetches one session by identifier.
    ///
    /// An id that matches no session yields an `invalid_request` error with
    /// an `unknown_session` detail code.
    async fn get_session(&self, request: GetSessionRequest) -> Result<GetSessionResponse, Error>;

    /// Lists the sessions led by a professional.
    async fn list_sessions_for_professional(
        &self,
        request: ListSessionsForProfessionalRequest,
    ) -> Result<ListSessionsResponse, Error>;

    /// Lists the sessions attached to a treatment plan.
    async fn list_sessions_for_treatment_plan(
        &self,
        request: ListSessionsForTreatmentPlanRequest,
    ) -> Result<ListSessionsResponse, Error>;

    /// Lists the notes of a session in append order; a session with no notes
    /// (or an unknown id) produces an empty list.
    async fn list_notes(&self, request: ListNotesRequest) -> Result<ListNotesResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionQuery;

#[async_trait]
impl SessionQuery for FixtureSessionQuery {
    async fn get_session(&self, request: GetSessionRequest) -> Result<GetSessionResponse, Error> {
        Err(unknown_session_error(request.session_id))
    }

    async fn list_sessions_for_professional(
        &self,
        _request: ListSessionsForProfessionalRequest,
    ) -> Result<ListSessionsResponse, Error> {
        Ok(ListSessionsResponse {
            sessions: Vec::new(),
        })
    }

    async fn list_sessions_for_treatment_plan(
        &self,
        _request: ListSessionsForTreatmentPlanRequest,
    ) -> Result<ListSessionsResponse, Error> {
        Ok(ListSessionsResponse {
            sessions: Vec::new(),
        })
    }

    async fn list_notes(&self, _request: ListNotesRequest) -> Result<ListNotesResponse, Error> {
        Ok(ListNotesResponse { notes: Vec::new() })
    }
}
