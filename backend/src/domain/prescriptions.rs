//! Prescription aggregate and its pill entries.
//!
//! A prescription covers a date range for a patient under a professional's
//! care, optionally bound to a treatment plan. Pills are append-only value
//! objects serialised alongside the prescription; they validate through
//! [`Pill::try_from`] on the way in so malformed stored payloads surface as
//! typed errors.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed length for a pill name.
pub const PILL_NAME_MAX: usize = 128;
/// Maximum allowed length for a pill description.
pub const PILL_DESCRIPTION_MAX: usize = 512;

/// Validation errors raised by prescription constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrescriptionValidationError {
    EndDateBeforeStartDate,
    EmptyPillName,
    PillNameTooLong { max: usize },
    PillDescriptionTooLong { max: usize },
}

impl fmt::Display for PrescriptionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndDateBeforeStartDate => {
                write!(f, "prescription end date must not precede the start date")
            }
            Self::EmptyPillName => write!(f, "pill name must not be empty"),
            Self::PillNameTooLong { max } => {
                write!(f, "pill name must be at most {max} characters")
            }
            Self::PillDescriptionTooLong { max } => {
                write!(f, "pill description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PrescriptionValidationError {}

/// Draft payload for a pill entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A medication entry on a prescription.
///
/// ## Invariants
/// - `name` is trimmed, non-empty, and at most [`PILL_NAME_MAX`] chars.
/// - `description` may be empty but is capped at [`PILL_DESCRIPTION_MAX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PillDraft")]
#[serde(rename_all = "camelCase")]
pub struct Pill {
    name: String,
    description: String,
}

impl Pill {
    /// Creates a validated pill entry.
    pub fn new(name: &str, description: &str) -> Result<Self, PrescriptionValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PrescriptionValidationError::EmptyPillName);
        }
        if name.chars().count() > PILL_NAME_MAX {
            return Err(PrescriptionValidationError::PillNameTooLong { max: PILL_NAME_MAX });
        }
        if description.chars().count() > PILL_DESCRIPTION_MAX {
            return Err(PrescriptionValidationError::PillDescriptionTooLong {
                max: PILL_DESCRIPTION_MAX,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            description: description.to_owned(),
        })
    }

    /// Medication name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dosage or administration notes; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl TryFrom<PillDraft> for Pill {
    type Error = PrescriptionValidationError;

    fn try_from(draft: PillDraft) -> Result<Self, Self::Error> {
        Self::new(&draft.name, &draft.description)
    }
}

/// Input payload for [`Prescription::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub treatment_plan_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pills: Vec<Pill>,
}

/// A prescription issued to a patient.
///
/// ## Invariants
/// - `end_date` is not earlier than `start_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    id: Uuid,
    patient_id: Uuid,
    professional_id: Uuid,
    treatment_plan_id: Option<Uuid>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    pills: Vec<Pill>,
}

impl Prescription {
    /// Creates a validated prescription from a draft.
    pub fn new(draft: PrescriptionDraft) -> Result<Self, PrescriptionValidationError> {
        Self::try_from(draft)
    }

    /// Stable prescription identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Patient the prescription was issued to.
    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    /// Prescribing professional.
    pub fn professional_id(&self) -> Uuid {
        self.professional_id
    }

    /// Treatment plan this prescription supports, when bound.
    pub fn treatment_plan_id(&self) -> Option<Uuid> {
        self.treatment_plan_id
    }

    /// First day the prescription applies.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day the prescription applies.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Pill entries in append order.
    pub fn pills(&self) -> &[Pill] {
        self.pills.as_slice()
    }

    /// Append a pill, consuming and returning the prescription.
    #[must_use]
    pub fn with_pill(mut self, pill: Pill) -> Self {
        self.pills.push(pill);
        self
    }
}

impl TryFrom<PrescriptionDraft> for Prescription {
    type Error = PrescriptionValidationError;

    fn try_from(draft: PrescriptionDraft) -> Result<Self, Self::Error> {
        if draft.end_date < draft.start_date {
            return Err(PrescriptionValidationError::EndDateBeforeStartDate);
        }

        Ok(Self {
            id: draft.id,
            patient_id: draft.patient_id,
            professional_id: draft.professional_id,
            treatment_plan_id: draft.treatment_plan_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            pills: draft.pills,
        })
    }
}
