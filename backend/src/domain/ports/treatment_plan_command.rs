//! Driving port for treatment plan mutations.
//!
//! A plan is created first; tasks, wellbeing checks, diagnostics and mood
//! observations then attach to it incrementally. Attach operations echo the
//! updated plan scalars; task execution echoes the task itself.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    BiologicalFunction, Diagnostic, Error, PatientState, Task, TaskStatus, TreatmentPlan,
    TreatmentPlanDraft, TreatmentPlanValidationError,
};

/// Build the structured error for a reference to a missing treatment plan.
///
/// The field name varies with the route: plan routes carry the id as
/// `treatmentPlanId` while prescription binding uses `treatmentId`.
pub(crate) fn unknown_treatment_plan_error(field: &'static str, value: Uuid) -> Error {
    Error::invalid_request("treatment plan not found").with_details(json!({
        "field": field,
        "value": value.to_string(),
        "code": "unknown_treatment_plan",
    }))
}

/// Build the structured error for a lookup that matched no task.
pub(crate) fn unknown_task_error(value: Uuid) -> Error {
    Error::invalid_request("task not found").with_details(json!({
        "field": "taskId",
        "value": value.to_string(),
        "code": "unknown_task",
    }))
}

/// Serializable treatment plan payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlanPayload {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TryFrom<TreatmentPlanPayload> for TreatmentPlan {
    type Error = TreatmentPlanValidationError;

    fn try_from(value: TreatmentPlanPayload) -> Result<Self, Self::Error> {
        TreatmentPlan::new(TreatmentPlanDraft {
            id: value.id,
            patient_id: value.patient_id,
            professional_id: value.professional_id,
            description: value.description,
            start_date: value.start_date,
            end_date: value.end_date,
        })
    }
}

impl From<TreatmentPlan> for TreatmentPlanPayload {
    fn from(value: TreatmentPlan) -> Self {
        Self {
            id: value.id(),
            patient_id: value.patient_id(),
            professional_id: value.professional_id(),
            description: value.description().to_owned(),
            start_date: value.start_date(),
            end_date: value.end_date(),
        }
    }
}

/// Serializable task payload for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub id: Uuid,
    pub treatment_plan_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl From<Task> for TaskPayload {
    fn from(value: Task) -> Self {
        Self {
            id: value.id(),
            treatment_plan_id: value.treatment_plan_id(),
            title: value.title().to_owned(),
            description: value.description().to_owned(),
            status: value.status(),
        }
    }
}

/// Fields accepted when creating a plan; the server mints the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlanDraftPayload {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TreatmentPlanDraftPayload {
    /// Build the domain entity under a minted id.
    pub(crate) fn into_entity(
        self,
        id: Uuid,
    ) -> Result<TreatmentPlan, TreatmentPlanValidationError> {
        TreatmentPlan::new(TreatmentPlanDraft {
            id,
            patient_id: self.patient_id,
            professional_id: self.professional_id,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Fields accepted when attaching a task; new tasks always start pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraftPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl TaskDraftPayload {
    /// Build the pending task under a minted id.
    pub(crate) fn into_record(
        self,
        id: Uuid,
        treatment_plan_id: Uuid,
    ) -> Result<Task, TreatmentPlanValidationError> {
        Task::new(
            id,
            treatment_plan_id,
            &self.title,
            &self.description,
            TaskStatus::Pending,
        )
    }
}

/// Fields accepted when attaching a wellbeing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiologicalFunctionDraftPayload {
    pub hunger: i32,
    pub hydration: i32,
    pub sleep: i32,
    pub energy: i32,
}

impl BiologicalFunctionDraftPayload {
    /// Build the wellbeing check under a minted id.
    pub(crate) fn into_record(
        self,
        id: Uuid,
        treatment_plan_id: Uuid,
    ) -> Result<BiologicalFunction, TreatmentPlanValidationError> {
        BiologicalFunction::new(
            id,
            treatment_plan_id,
            self.hunger,
            self.hydration,
            self.sleep,
            self.energy,
        )
    }
}

/// Fields accepted when attaching a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticDraftPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl DiagnosticDraftPayload {
    /// Build the diagnostic under a minted id.
    pub(crate) fn into_record(
        self,
        id: Uuid,
        treatment_plan_id: Uuid,
    ) -> Result<Diagnostic, TreatmentPlanValidationError> {
        Diagnostic::new(id, treatment_plan_id, &self.name, &self.description)
    }
}

/// Fields accepted when attaching a mood observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStateDraftPayload {
    pub mood: i32,
    #[serde(default)]
    pub description: String,
}

impl PatientStateDraftPayload {
    /// Build the mood observation under a minted id.
    pub(crate) fn into_record(
        self,
        id: Uuid,
        treatment_plan_id: Uuid,
    ) -> Result<PatientState, TreatmentPlanValidationError> {
        PatientState::new(id, treatment_plan_id, self.mood, &self.description)
    }
}

/// Request to create a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreatmentPlanRequest {
    pub plan: TreatmentPlanDraftPayload,
}

/// Response from creating a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreatmentPlanResponse {
    pub plan: TreatmentPlanPayload,
}

/// Request to attach a task to an existing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub treatment_plan_id: Uuid,
    pub task: TaskDraftPayload,
}

/// Request to attach a wellbeing check to an existing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBiologicalFunctionRequest {
    pub treatment_plan_id: Uuid,
    pub record: BiologicalFunctionDraftPayload,
}

/// Request to attach a diagnostic to an existing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDiagnosticRequest {
    pub treatment_plan_id: Uuid,
    pub record: DiagnosticDraftPayload,
}

/// Request to attach a mood observation to an existing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPatientStateRequest {
    pub treatment_plan_id: Uuid,
    pub record: PatientStateDraftPayload,
}

/// Response from attaching a record: the updated plan scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRecordResponse {
    pub plan: TreatmentPlanPayload,
}

/// Request to mark a task completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTaskRequest {
    pub task_id: Uuid,
}

/// Response from executing a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTaskResponse {
    pub task: TaskPayload,
}

/// Driving port for treatment plan write operations.
///
/// Every attach operation requires the plan to exist and yields an
/// `invalid_request` error with an `unknown_treatment_plan` detail code
/// otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TreatmentPlanCommand: Send + Sync {
    /// Creates a treatment plan and returns the stored resource.
    async fn create_plan(
        &self,
        request: CreateTreatmentPlanRequest,
    ) -> Result<CreateTreatmentPlanResponse, Error>;

    /// Attaches a pending task to an existing plan.
    async fn add_task(&self, request: AddTaskRequest) -> Result<AttachRecordResponse, Error>;

    /// Attaches a wellbeing check to an existing plan.
    async fn add_biological_function(
        &self,
        request: AddBiologicalFunctionRequest,
    ) -> Result<AttachRecordResponse, Error>;

    /// Attaches a diagnostic to an existing plan.
    async fn add_diagnostic(
        &self,
        request: AddDiagnosticRequest,
    ) -> Result<AttachRecordResponse, Error>;

    /// Attaches a mood observation to an existing plan.
    async fn add_patient_state(
        &self,
        request: AddPatientStateRequest,
    ) -> Result<AttachRecordResponse, Error>;

    /// Marks a task completed; executing an already-completed task is a
    /// no-op that still echoes the task.
    async fn execute_task(&self, request: ExecuteTaskRequest)
    -> Result<ExecuteTaskResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Creates echo the draft with a minted id; attach and execute operations
/// report the referenced aggregate as unknown because nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTreatmentPlanCommand;

#[async_trait]
impl TreatmentPlanCommand for FixtureTreatmentPlanCommand {
    async fn create_plan(
        &self,
        request: CreateTreatmentPlanRequest,
    ) -> Result<CreateTreatmentPlanResponse, Error> {
        let plan = request.plan.into_entity(Uuid::new_v4()).map_err(|err| {
            Error::invalid_request(format!("invalid treatment plan payload: {err}"))
        })?;

        Ok(CreateTreatmentPlanResponse { plan: plan.into() })
    }

    async fn add_task(&self, request: AddTaskRequest) -> Result<AttachRecordResponse, Error> {
        Err(unknown_treatment_plan_error(
            "treatmentPlanId",
            request.treatment_plan_id,
        ))
    }

    async fn add_biological_function(
        &self,
        request: AddBiologicalFunctionRequest,
    ) -> Result<AttachRecordResponse, Error> {
        Err(unknown_treatment_plan_error(
            "treatmentPlanId",
            request.treatment_plan_id,
        ))
    }

    async fn add_diagnostic(
        &self,
        request: AddDiagnosticRequest,
    ) -> Result<AttachRecordResponse, Error> {
        Err(unknown_treatment_plan_error(
            "treatmentPlanId",
            request.treatment_plan_id,
        ))
    }

    async fn add_patient_state(
        &self,
        request: AddPatientStateRequest,
    ) -> Result<AttachRecordResponse, Error> {
        Err(unknown_treatment_plan_error(
            "treatmentPlanId",
            request.treatment_plan_id,
        ))
    }

    async fn execute_task(
        &self,
        request: ExecuteTaskRequest,
    ) -> Result<ExecuteTaskResponse, Error> {
        Err(unknown_task_error(request.task_id))
    }
}
