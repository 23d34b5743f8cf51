//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.
//!
//! This adapter persists clinical sessions and their append-only notes.
//! Notes are inserted once and read back in append order; sessions upsert so
//! repeated saves of the same id stay idempotent.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{Note, Session};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewNoteRow, NewSessionRow, NoteRow, SessionRow, SessionUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{notes, sessions};

/// Diesel-backed implementation of the session repository port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> SessionRepositoryError {
    map_basic_pool_error(error, SessionRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> SessionRepositoryError {
    map_basic_diesel_error(
        error,
        SessionRepositoryError::query,
        SessionRepositoryError::connection,
    )
}

/// Convert a database row into a domain session.
fn row_to_session(row: SessionRow) -> Session {
    let SessionRow {
        id,
        patient_id,
        professional_id,
        session_date,
        treatment_plan_id,
        created_at: _,
        updated_at: _,
    } = row;

    Session::new(id, patient_id, professional_id, session_date, treatment_plan_id)
}

/// Convert a database row into a validated domain note.
fn row_to_note(row: NoteRow) -> Result<Note, SessionRepositoryError> {
    let NoteRow {
        id,
        session_id,
        content,
        created_at: _,
    } = row;

    Note::new(id, session_id, &content)
        .map_err(|err| SessionRepositoryError::query(err.to_string()))
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewSessionRow {
            id: session.id(),
            patient_id: session.patient_id(),
            professional_id: session.professional_id(),
            session_date: session.session_date(),
            treatment_plan_id: session.treatment_plan_id(),
        };

        let update_row = SessionUpdate {
            patient_id: session.patient_id(),
            professional_id: session.professional_id(),
            session_date: session.session_date(),
            treatment_plan_id: Some(session.treatment_plan_id()),
        };

        diesel::insert_into(sessions::table)
            .values(&new_row)
            .on_conflict(sessions::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = sessions::table
            .filter(sessions::id.eq(session_id))
            .select(SessionRow::as_select())
            .first::<SessionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_session))
    }

    async fn list_by_professional_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SessionRow> = sessions::table
            .filter(sessions::professional_id.eq(professional_id))
            .order((sessions::session_date.asc(), sessions::id.asc()))
            .select(SessionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_session).collect())
    }

    async fn list_by_treatment_plan_id(
        &self,
        treatment_plan_id: &Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SessionRow> = sessions::table
            .filter(sessions::treatment_plan_id.eq(treatment_plan_id))
            .order((sessions::session_date.asc(), sessions::id.asc()))
            .select(SessionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_session).collect())
    }

    async fn add_note(&self, note: &Note) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewNoteRow {
            id: note.id(),
            session_id: note.session_id(),
            content: note.content(),
        };

        diesel::insert_into(notes::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_notes(&self, session_id: &Uuid) -> Result<Vec<Note>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NoteRow> = notes::table
            .filter(notes::session_id.eq(session_id))
            .order((notes::created_at.asc(), notes::id.asc()))
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_note).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn session_row() -> SessionRow {
        let now = Utc::now();
        SessionRow {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            session_date: now,
            treatment_plan_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[fixture]
    fn note_row() -> NoteRow {
        NoteRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            content: "Slept through the night for the first time this month.".into(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, SessionRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, SessionRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn session_row_keeps_the_optional_plan_link(mut session_row: SessionRow) {
        let plan_id = Uuid::new_v4();
        session_row.treatment_plan_id = Some(plan_id);

        let session = row_to_session(session_row);
        assert_eq!(session.treatment_plan_id(), Some(plan_id));
    }

    #[rstest]
    fn note_row_converts_through_validation(note_row: NoteRow) {
        let expected_session = note_row.session_id;

        let note = row_to_note(note_row).expect("valid row should convert");
        assert_eq!(note.session_id(), expected_session);
    }

    #[rstest]
    fn note_row_rejects_blank_stored_content(mut note_row: NoteRow) {
        note_row.content = "   ".into();

        let error = row_to_note(note_row).expect_err("blank content should fail");
        assert!(matches!(error, SessionRepositoryError::Query { .. }));
        assert!(error.to_string().contains("note content"));
    }
}
