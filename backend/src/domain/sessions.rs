//! Clinical session (appointment) and note aggregates.
//!
//! A session records an appointment between a patient and a professional,
//! optionally linked to a treatment plan. Notes are append-only child records
//! written during or after the appointment.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum allowed length for note content.
pub const NOTE_CONTENT_MAX: usize = 2048;

/// Validation errors raised by [`Note::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyContent,
    ContentTooLong { max: usize },
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "note content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for NoteValidationError {}

/// An appointment between a patient and a professional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    patient_id: Uuid,
    professional_id: Uuid,
    session_date: DateTime<Utc>,
    treatment_plan_id: Option<Uuid>,
}

impl Session {
    /// Assemble a session; all fields are individually typed so there is
    /// nothing further to validate.
    pub fn new(
        id: Uuid,
        patient_id: Uuid,
        professional_id: Uuid,
        session_date: DateTime<Utc>,
        treatment_plan_id: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            patient_id,
            professional_id,
            session_date,
            treatment_plan_id,
        }
    }

    /// Stable session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Patient attending the appointment.
    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    /// Professional leading the appointment.
    pub fn professional_id(&self) -> Uuid {
        self.professional_id
    }

    /// Scheduled date and time of the appointment.
    pub fn session_date(&self) -> DateTime<Utc> {
        self.session_date
    }

    /// Treatment plan this appointment belongs to, when linked.
    pub fn treatment_plan_id(&self) -> Option<Uuid> {
        self.treatment_plan_id
    }
}

/// A clinical note attached to a session.
///
/// ## Invariants
/// - `content` is trimmed, non-empty, and at most [`NOTE_CONTENT_MAX`] chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: Uuid,
    session_id: Uuid,
    content: String,
}

impl Note {
    /// Creates a validated note.
    pub fn new(id: Uuid, session_id: Uuid, content: &str) -> Result<Self, NoteValidationError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        if content.chars().count() > NOTE_CONTENT_MAX {
            return Err(NoteValidationError::ContentTooLong {
                max: NOTE_CONTENT_MAX,
            });
        }

        Ok(Self {
            id,
            session_id,
            content: content.to_owned(),
        })
    }

    /// Stable note identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Session this note belongs to.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Free-text note body.
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn session_carries_optional_treatment_plan() {
        let plan_id = Uuid::new_v4();
        let linked = Session::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc::now(),
            Some(plan_id),
        );
        assert_eq!(linked.treatment_plan_id(), Some(plan_id));

        let standalone = Session::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Utc::now(),
            None,
        );
        assert!(standalone.treatment_plan_id().is_none());
    }

    #[rstest]
    fn note_trims_content() {
        let note = Note::new(Uuid::new_v4(), Uuid::new_v4(), "  slept better  ")
            .expect("trimmed content is valid");
        assert_eq!(note.content(), "slept better");
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank(" \t ")]
    fn note_rejects_blank_content(#[case] content: &str) {
        let err = Note::new(Uuid::new_v4(), Uuid::new_v4(), content)
            .expect_err("blank content must fail");
        assert_eq!(err, NoteValidationError::EmptyContent);
    }

    #[rstest]
    fn note_rejects_overlong_content() {
        let content = "a".repeat(NOTE_CONTENT_MAX + 1);
        let err = Note::new(Uuid::new_v4(), Uuid::new_v4(), &content)
            .expect_err("overlong content must fail");
        assert_eq!(
            err,
            NoteValidationError::ContentTooLong {
                max: NOTE_CONTENT_MAX
            }
        );
    }

    #[rstest]
    fn note_accepts_content_at_the_limit() {
        let content = "a".repeat(NOTE_CONTENT_MAX);
        let note = Note::new(Uuid::new_v4(), Uuid::new_v4(), &content)
            .expect("content at the limit is valid");
        assert_eq!(note.content().chars().count(), NOTE_CONTENT_MAX);
    }
}
