//! Port for treatment plan persistence.
//!
//! Plans and their tasks are read back individually; wellbeing checks,
//! diagnostics and mood observations are append-only records with no read
//! path of their own. Task saves are upserts so execution reuses the same
//! write path as attachment.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BiologicalFunction, Diagnostic, PatientState, Task, TreatmentPlan};

use super::define_port_error;

define_port_error! {
    /// Errors raised by treatment plan repository adapters.
    pub enum TreatmentPlanRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "treatment plan repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "treatment plan repository query failed: {message}",
    }
}

/// Port for writing and reading treatment plans and their records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TreatmentPlanRepository: Send + Sync {
    /// Persist a treatment plan.
    async fn save(&self, plan: &TreatmentPlan) -> Result<(), TreatmentPlanRepositoryError>;

    /// Find a treatment plan by id.
    async fn find_by_id(
        &self,
        plan_id: &Uuid,
    ) -> Result<Option<TreatmentPlan>, TreatmentPlanRepositoryError>;

    /// Read the treatment plans recorded for a patient.
    async fn list_by_patient_id(
        &self,
        patient_id: &Uuid,
    ) -> Result<Vec<TreatmentPlan>, TreatmentPlanRepositoryError>;

    /// Persist a task, replacing any stored task with the same id.
    async fn save_task(&self, task: &Task) -> Result<(), TreatmentPlanRepositoryError>;

    /// Find a task by id.
    async fn find_task_by_id(
        &self,
        task_id: &Uuid,
    ) -> Result<Option<Task>, TreatmentPlanRepositoryError>;

    /// Read the tasks attached to a plan.
    async fn list_tasks(&self, plan_id: &Uuid) -> Result<Vec<Task>, TreatmentPlanRepositoryError>;

    /// Append a wellbeing check to a plan.
    async fn add_biological_function(
        &self,
        record: &BiologicalFunction,
    ) -> Result<(), TreatmentPlanRepositoryError>;

    /// Append a diagnostic to a plan.
    async fn add_diagnostic(&self, record: &Diagnostic)
    -> Result<(), TreatmentPlanRepositoryError>;

    /// Append a mood observation to a plan.
    async fn add_patient_state(
        &self,
        record: &PatientState,
    ) -> Result<(), TreatmentPlanRepositoryError>;
}

/// Fixture implementation for tests that do not exercise plan persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTreatmentPlanRepository;

#[async_trait]
impl TreatmentPlanRepository for FixtureTreatmentPlanRepository {
    async fn save(&self, _plan: &TreatmentPlan) -> Result<(), TreatmentPlanRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _plan_id: &Uuid,
    ) -> Result<Option<TreatmentPlan>, TreatmentPlanRepositoryError> {
        Ok(None)
    }

    async fn list_by_patient_id(
        &self,
        _patient_id: &Uuid,
    ) -> Result<Vec<TreatmentPlan>, TreatmentPlanRepositoryError> {
        Ok(Vec::new())
    }

    async fn save_task(&self, _task: &Task) -> Result<(), TreatmentPlanRepositoryError> {
        Ok(())
    }

    async fn find_task_by_id(
        &self,
        _task_id: &Uuid,
    ) -> Result<Option<Task>, TreatmentPlanRepositoryError> {
        Ok(None)
    }

    async fn list_tasks(
        &self,
        _plan_id: &Uuid,
    ) -> Result<Vec<Task>, TreatmentPlanRepositoryError> {
        Ok(Vec::new())
    }

    async fn add_biological_function(
        &self,
        _record: &BiologicalFunction,
    ) -> Result<(), TreatmentPlanRepositoryError> {
        Ok(())
    }

    async fn add_diagnostic(
        &self,
        _record: &Diagnostic,
    ) -> Result<(), TreatmentPlanRepositoryError> {
        Ok(())
    }

    async fn add_patient_state(
        &self,
        _record: &PatientState,
    ) -> Result<(), TreatmentPlanRepositoryError> {
        Ok(())
    }
}
