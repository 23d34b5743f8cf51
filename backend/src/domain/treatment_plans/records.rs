//! Child records attached to a treatment plan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{TITLE_MAX, TreatmentPlanValidationError, validate_description};

/// Lower bound for wellbeing ratings.
pub const RATING_MIN: i32 = 0;
/// Upper bound for wellbeing ratings.
pub const RATING_MAX: i32 = 10;

/// Which wellbeing metric a rating belongs to; used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingMetric {
    Hunger,
    Hydration,
    Sleep,
    Energy,
    Mood,
}

impl fmt::Display for RatingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hunger => f.write_str("hunger"),
            Self::Hydration => f.write_str("hydration"),
            Self::Sleep => f.write_str("sleep"),
            Self::Energy => f.write_str("energy"),
            Self::Mood => f.write_str("mood"),
        }
    }
}

fn validate_rating(metric: RatingMetric, value: i32) -> Result<i32, TreatmentPlanValidationError> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(TreatmentPlanValidationError::RatingOutOfRange { metric, value });
    }
    Ok(value)
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// Error returned when parsing a task status from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTaskStatusError;

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

impl fmt::Display for ParseTaskStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid task status")
    }
}

impl std::error::Error for ParseTaskStatusError {}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError),
        }
    }
}

/// An actionable step assigned within a treatment plan.
///
/// ## Invariants
/// - `title` is trimmed, non-empty, and at most [`TITLE_MAX`] chars.
/// - `description` may be empty but is capped like plan descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: Uuid,
    treatment_plan_id: Uuid,
    title: String,
    description: String,
    status: TaskStatus,
}

impl Task {
    /// Creates a validated task.
    pub fn new(
        id: Uuid,
        treatment_plan_id: Uuid,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Self, TreatmentPlanValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TreatmentPlanValidationError::EmptyTaskTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(TreatmentPlanValidationError::TaskTitleTooLong { max: TITLE_MAX });
        }
        let description = validate_description(description)?;

        Ok(Self {
            id,
            treatment_plan_id,
            title: title.to_owned(),
            description,
            status,
        })
    }

    /// Stable task identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Plan this task belongs to.
    pub fn treatment_plan_id(&self) -> Uuid {
        self.treatment_plan_id
    }

    /// Short imperative label for the task.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Longer guidance for the patient; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current lifecycle state.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Mark the task completed. Executing an already-completed task is a
    /// no-op, keeping the operation idempotent.
    #[must_use]
    pub fn execute(mut self) -> Self {
        self.status = TaskStatus::Completed;
        self
    }
}

/// A wellbeing check recorded against a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiologicalFunction {
    id: Uuid,
    treatment_plan_id: Uuid,
    hunger: i32,
    hydration: i32,
    sleep: i32,
    energy: i32,
}

impl BiologicalFunction {
    /// Creates a validated wellbeing check; each rating must fall within
    /// [`RATING_MIN`]..=[`RATING_MAX`].
    pub fn new(
        id: Uuid,
        treatment_plan_id: Uuid,
        hunger: i32,
        hydration: i32,
        sleep: i32,
        energy: i32,
    ) -> Result<Self, TreatmentPlanValidationError> {
        Ok(Self {
            id,
            treatment_plan_id,
            hunger: validate_rating(RatingMetric::Hunger, hunger)?,
            hydration: validate_rating(RatingMetric::Hydration, hydration)?,
            sleep: validate_rating(RatingMetric::Sleep, sleep)?,
            energy: validate_rating(RatingMetric::Energy, energy)?,
        })
    }

    /// Stable record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Plan this record belongs to.
    pub fn treatment_plan_id(&self) -> Uuid {
        self.treatment_plan_id
    }

    /// Appetite rating.
    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    /// Hydration rating.
    pub fn hydration(&self) -> i32 {
        self.hydration
    }

    /// Sleep quality rating.
    pub fn sleep(&self) -> i32 {
        self.sleep
    }

    /// Energy level rating.
    pub fn energy(&self) -> i32 {
        self.energy
    }
}

/// A clinical diagnostic recorded against a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    id: Uuid,
    treatment_plan_id: Uuid,
    name: String,
    description: String,
}

impl Diagnostic {
    /// Creates a validated diagnostic.
    pub fn new(
        id: Uuid,
        treatment_plan_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Self, TreatmentPlanValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TreatmentPlanValidationError::EmptyDiagnosticName);
        }
        if name.chars().count() > TITLE_MAX {
            return Err(TreatmentPlanValidationError::DiagnosticNameTooLong { max: TITLE_MAX });
        }
        let description = validate_description(description)?;

        Ok(Self {
            id,
            treatment_plan_id,
            name: name.to_owned(),
            description,
        })
    }

    /// Stable record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Plan this record belongs to.
    pub fn treatment_plan_id(&self) -> Uuid {
        self.treatment_plan_id
    }

    /// Diagnosis label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clinical context for the diagnosis; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A mood observation recorded against a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientState {
    id: Uuid,
    treatment_plan_id: Uuid,
    mood: i32,
    description: String,
}

impl PatientState {
    /// Creates a validated mood observation; `mood` must fall within
    /// [`RATING_MIN`]..=[`RATING_MAX`].
    pub fn new(
        id: Uuid,
        treatment_plan_id: Uuid,
        mood: i32,
        description: &str,
    ) -> Result<Self, TreatmentPlanValidationError> {
        Ok(Self {
            id,
            treatment_plan_id,
            mood: validate_rating(RatingMetric::Mood, mood)?,
            description: validate_description(description)?,
        })
    }

    /// Stable record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Plan this record belongs to.
    pub fn treatment_plan_id(&self) -> Uuid {
        self.treatment_plan_id
    }

    /// Mood rating.
    pub fn mood(&self) -> i32 {
        self.mood
    }

    /// Free-text observation; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}
