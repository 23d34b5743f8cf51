//! Treatment plan aggregate and its attached clinical records.
//!
//! A treatment plan frames a patient's care over a date range. Tasks,
//! biological-function checks, diagnostics, and patient-state observations
//! attach to an existing plan as append-only child records; task execution
//! is the only state transition and is idempotent.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

mod records;

pub use records::{
    BiologicalFunction, Diagnostic, ParseTaskStatusError, PatientState, RATING_MAX, RATING_MIN,
    RatingMetric, Task, TaskStatus,
};

/// Maximum allowed length for plan, task, diagnostic, and state descriptions.
pub const DESCRIPTION_MAX: usize = 512;
/// Maximum allowed length for task titles and diagnostic names.
pub const TITLE_MAX: usize = 128;

/// Validation errors raised by treatment plan constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreatmentPlanValidationError {
    EmptyDescription,
    DescriptionTooLong { max: usize },
    EndDateBeforeStartDate,
    EmptyTaskTitle,
    TaskTitleTooLong { max: usize },
    EmptyDiagnosticName,
    DiagnosticNameTooLong { max: usize },
    RatingOutOfRange { metric: RatingMetric, value: i32 },
}

impl fmt::Display for TreatmentPlanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::EndDateBeforeStartDate => {
                write!(f, "treatment plan end date must not precede the start date")
            }
            Self::EmptyTaskTitle => write!(f, "task title must not be empty"),
            Self::TaskTitleTooLong { max } => {
                write!(f, "task title must be at most {max} characters")
            }
            Self::EmptyDiagnosticName => write!(f, "diagnostic name must not be empty"),
            Self::DiagnosticNameTooLong { max } => {
                write!(f, "diagnostic name must be at most {max} characters")
            }
            Self::RatingOutOfRange { metric, value } => write!(
                f,
                "{metric} rating must be between {RATING_MIN} and {RATING_MAX} (got {value})"
            ),
        }
    }
}

impl std::error::Error for TreatmentPlanValidationError {}

/// Validate a description-style field shared by plans and child records.
pub(super) fn validate_description(
    text: &str,
) -> Result<String, TreatmentPlanValidationError> {
    let trimmed = text.trim();
    if trimmed.chars().count() > DESCRIPTION_MAX {
        return Err(TreatmentPlanValidationError::DescriptionTooLong {
            max: DESCRIPTION_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// Input payload for [`TreatmentPlan::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentPlanDraft {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A plan of care for a patient over a date range.
///
/// ## Invariants
/// - `description` is trimmed, non-empty, and at most [`DESCRIPTION_MAX`]
///   chars.
/// - `end_date` is not earlier than `start_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentPlan {
    id: Uuid,
    patient_id: Uuid,
    professional_id: Uuid,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TreatmentPlan {
    /// Creates a validated treatment plan from a draft.
    pub fn new(draft: TreatmentPlanDraft) -> Result<Self, TreatmentPlanValidationError> {
        Self::try_from(draft)
    }

    /// Stable plan identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Patient under care.
    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    /// Professional responsible for the plan.
    pub fn professional_id(&self) -> Uuid {
        self.professional_id
    }

    /// Goal and approach of the plan.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// First day the plan applies.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day the plan applies.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

impl TryFrom<TreatmentPlanDraft> for TreatmentPlan {
    type Error = TreatmentPlanValidationError;

    fn try_from(draft: TreatmentPlanDraft) -> Result<Self, Self::Error> {
        let description = validate_description(&draft.description)?;
        if description.is_empty() {
            return Err(TreatmentPlanValidationError::EmptyDescription);
        }
        if draft.end_date < draft.start_date {
            return Err(TreatmentPlanValidationError::EndDateBeforeStartDate);
        }

        Ok(Self {
            id: draft.id,
            patient_id: draft.patient_id,
            professional_id: draft.professional_id,
            description,
            start_date: draft.start_date,
            end_date: draft.end_date,
        })
    }
}
