//! PostgreSQL-backed `TreatmentPlanRepository` implementation using Diesel ORM.
//!
//! This adapter persists treatment plans, their tasks, and the append-only
//! clinical records attached to a plan. Plans and tasks upsert so execution
//! reuses the attachment write path; wellbeing checks, diagnostics, and mood
//! observations insert once and are never read back individually.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TreatmentPlanRepository, TreatmentPlanRepositoryError};
use crate::domain::{
    BiologicalFunction, Diagnostic, PatientState, Task, TaskStatus, TreatmentPlan,
    TreatmentPlanDraft,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    NewBiologicalFunctionRow, NewDiagnosticRow, NewPatientStateRow, NewTaskRow,
    NewTreatmentPlanRow, TaskRow, TaskUpdate, TreatmentPlanRow, TreatmentPlanUpdate,
};
use super::pool::{DbPool, PoolError};
use super::schema::{biological_functions, diagnostics, patient_states, tasks, treatment_plans};

/// Diesel-backed implementation of the treatment plan repository port.
#[derive(Clone)]
pub struct DieselTreatmentPlanRepository {
    pool: DbPool,
}

impl DieselTreatmentPlanRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> TreatmentPlanRepositoryError {
    map_basic_pool_error(error, TreatmentPlanRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> TreatmentPlanRepositoryError {
    map_basic_diesel_error(
        error,
        TreatmentPlanRepositoryError::query,
        TreatmentPlanRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain treatment plan.
fn row_to_treatment_plan(
    row: TreatmentPlanRow,
) -> Result<TreatmentPlan, TreatmentPlanRepositoryError> {
    let TreatmentPlanRow {
        id,
        patient_id,
        professional_id,
        description,
        start_date,
        end_date,
        created_at: _,
        updated_at: _,
    } = row;

    TreatmentPlan::new(TreatmentPlanDraft {
        id,
        patient_id,
        professional_id,
        description,
        start_date,
        end_date,
    })
    .map_err(|err| TreatmentPlanRepositoryError::query(err.to_string()))
}

/// Convert a database row into a validated domain task.
fn row_to_task(row: TaskRow) -> Result<Task, TreatmentPlanRepositoryError> {
    let TaskRow {
        id,
        treatment_plan_id,
        title,
        description,
        status,
        created_at: _,
        updated_at: _,
    } = row;

    let status: TaskStatus = status
        .parse()
        .map_err(|_| TreatmentPlanRepositoryError::query(format!("stored task status: {status}")))?;

    Task::new(id, treatment_plan_id, &title, &description, status)
        .map_err(|err| TreatmentPlanRepositoryError::query(err.to_string()))
}

#[async_trait]
impl TreatmentPlanRepository for DieselTreatmentPlanRepository {
    async fn save(&self, plan: &TreatmentPlan) -> Result<(), TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTreatmentPlanRow {
            id: plan.id(),
            patient_id: plan.patient_id(),
            professional_id: plan.professional_id(),
            description: plan.description(),
            start_date: plan.start_date(),
            end_date: plan.end_date(),
        };

        let update_row = TreatmentPlanUpdate {
            patient_id: plan.patient_id(),
            professional_id: plan.professional_id(),
            description: plan.description(),
            start_date: plan.start_date(),
            end_date: plan.end_date(),
        };

        diesel::insert_into(treatment_plans::table)
            .values(&new_row)
            .on_conflict(treatment_plans::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        plan_id: &Uuid,
    ) -> Result<Option<TreatmentPlan>, TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = treatment_plans::table
            .filter(treatment_plans::id.eq(plan_id))
            .select(TreatmentPlanRow::as_select())
            .first::<TreatmentPlanRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_treatment_plan).transpose()
    }

    async fn list_by_patient_id(
        &self,
        patient_id: &Uuid,
    ) -> Result<Vec<TreatmentPlan>, TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TreatmentPlanRow> = treatment_plans::table
            .filter(treatment_plans::patient_id.eq(patient_id))
            .order((treatment_plans::created_at.asc(), treatment_plans::id.asc()))
            .select(TreatmentPlanRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_treatment_plan).collect()
    }

    async fn save_task(&self, task: &Task) -> Result<(), TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let status = task.status().to_string();

        let new_row = NewTaskRow {
            id: task.id(),
            treatment_plan_id: task.treatment_plan_id(),
            title: task.title(),
            description: task.description(),
            status: &status,
        };

        let update_row = TaskUpdate {
            title: task.title(),
            description: task.description(),
            status: &status,
        };

        diesel::insert_into(tasks::table)
            .values(&new_row)
            .on_conflict(tasks::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_task_by_id(
        &self,
        task_id: &Uuid,
    ) -> Result<Option<Task>, TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = tasks::table
            .filter(tasks::id.eq(task_id))
            .select(TaskRow::as_select())
            .first::<TaskRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_task).transpose()
    }

    async fn list_tasks(&self, plan_id: &Uuid) -> Result<Vec<Task>, TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::treatment_plan_id.eq(plan_id))
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn add_biological_function(
        &self,
        record: &BiologicalFunction,
    ) -> Result<(), TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBiologicalFunctionRow {
            id: record.id(),
            treatment_plan_id: record.treatment_plan_id(),
            hunger: record.hunger(),
            hydration: record.hydration(),
            sleep: record.sleep(),
            energy: record.energy(),
        };

        diesel::insert_into(biological_functions::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn add_diagnostic(
        &self,
        record: &Diagnostic,
    ) -> Result<(), TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDiagnosticRow {
            id: record.id(),
            treatment_plan_id: record.treatment_plan_id(),
            name: record.name(),
            description: record.description(),
        };

        diesel::insert_into(diagnostics::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn add_patient_state(
        &self,
        record: &PatientState,
    ) -> Result<(), TreatmentPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPatientStateRow {
            id: record.id(),
            treatment_plan_id: record.treatment_plan_id(),
            mood: record.mood(),
            description: record.description(),
        };

        diesel::insert_into(patient_states::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
