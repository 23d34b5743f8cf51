//! Driving port for clinical session mutations.
//!
//! Sessions are appointments; notes append to an existing session and the
//! session scalars are echoed back so callers see the aggregate they touched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, Note, Session};

/// Build the structured error for a lookup that matched no session.
pub(crate) fn unknown_session_error(value: Uuid) -> Error {
    Error::invalid_request("session not found").with_details(json!({
        "field": "sessionId",
        "value": value.to_string(),
        "code": "unknown_session",
    }))
}

/// Serializable session payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub session_date: DateTime<Utc>,
    pub treatment_plan_id: Option<Uuid>,
}

impl From<SessionPayload> for Session {
    fn from(value: SessionPayload) -> Self {
        Session::new(
            value.id,
            value.patient_id,
            value.professional_id,
            value.session_date,
            value.treatment_plan_id,
        )
    }
}

impl From<Session> for SessionPayload {
    fn from(value: Session) -> Self {
        Self {
            id: value.id(),
            patient_id: value.patient_id(),
            professional_id: value.professional_id(),
            session_date: value.session_date(),
            treatment_plan_id: value.treatment_plan_id(),
        }
    }
}

/// Serializable note payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: String,
}

impl From<Note> for NotePayload {
    fn from(value: Note) -> Self {
        Self {
            id: value.id(),
            session_id: value.session_id(),
            content: value.content().to_owned(),
        }
    }
}

/// Fields accepted when scheduling a session; the server mints the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraftPayload {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub session_date: DateTime<Utc>,
    pub treatment_plan_id: Option<Uuid>,
}

impl SessionDraftPayload {
    /// Build the domain entity under a minted id.
    pub(crate) fn into_entity(self, id: Uuid) -> Session {
        Session::new(
            id,
            self.patient_id,
            self.professional_id,
            self.session_date,
            self.treatment_plan_id,
        )
    }
}

/// Fields accepted when appending a note; the session id comes from the
/// request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraftPayload {
    pub content: String,
}

/// Request to schedule a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub session: SessionDraftPayload,
}

/// Response from scheduling a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session: SessionPayload,
}

/// Request to append a note to an existing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub session_id: Uuid,
    pub note: NoteDraftPayload,
}

/// Response from appending a note: the updated session scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteResponse {
    pub session: SessionPayload,
}

/// Driving port for clinical session write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionCommand: Send + Sync {
    /// Schedules a session and returns the stored resource.
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, Error>;

    /// Appends a note to an existing session.
    ///
    /// An id that matches no session yields an `invalid_request` error with
    /// an `unknown_session` detail code.
    async fn add_note(&self, request: AddNoteRequest) -> Result<AddNoteResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// `create_session` echoes the draft with a minted id; `add_note` always
/// reports the session as unknown because nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionCommand;

#[async_trait]
impl SessionCommand for FixtureSessionCommand {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, Error> {
        let session = request.session.into_entity(Uuid::new_v4());

        Ok(CreateSessionResponse {
            session: session.into(),
        })
    }

    async fn add_note(&self, request: AddNoteRequest) -> Result<AddNoteResponse, Error> {
        Err(unknown_session_error(request.session_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft_payload() -> SessionDraftPayload {
        SessionDraftPayload {
            patient_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            session_date: DateTime::parse_from_rfc3339("2026-02-03T14:30:00Z")
                .expect("RFC3339 fixture timestamp")
                .with_timezone(&Utc),
            treatment_plan_id: Some(Uuid::new_v4()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_echoes_the_draft(draft_payload: SessionDraftPayload) {
        let command = FixtureSessionCommand;

        let response = command
            .create_session(CreateSessionRequest {
                session: draft_payload.clone(),
            })
            .await
            .expect("fixture create succeeds");

        assert_eq!(response.session.patient_id, draft_payload.patient_id);
        assert_eq!(response.session.session_date, draft_payload.session_date);
        assert_eq!(
            response.session.treatment_plan_id,
            draft_payload.treatment_plan_id
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_reports_unknown_sessions_for_notes() {
        let command = FixtureSessionCommand;
        let request = AddNoteRequest {
            session_id: Uuid::new_v4(),
            note: NoteDraftPayload {
                content: "Reviewed sleep hygiene".to_owned(),
            },
        };

        let error = command.add_note(request).await.expect_err("nothing stored");

        let details = error.details().expect("structured details");
        assert_eq!(details["code"], "unknown_session");
    }

    #[rstest]
    fn payload_round_trip_through_domain_entity(draft_payload: SessionDraftPayload) {
        let payload = SessionPayload {
            id: Uuid::new_v4(),
            patient_id: draft_payload.patient_id,
            professional_id: draft_payload.professional_id,
            session_date: draft_payload.session_date,
            treatment_plan_id: None,
        };

        let session = Session::from(payload.clone());
        let restored = SessionPayload::from(session);

        assert_eq!(restored, payload);
    }
}
