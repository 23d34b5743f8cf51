//! Treatment plan domain services.
//!
//! The command service guards every attach operation behind a plan lookup so
//! records never reference a missing plan, and persists task execution
//! through the same upsert used for attachment.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AddBiologicalFunctionRequest, AddDiagnosticRequest, AddPatientStateRequest, AddTaskRequest,
    AttachRecordResponse, CreateTreatmentPlanRequest, CreateTreatmentPlanResponse,
    ExecuteTaskRequest, ExecuteTaskResponse, GetTreatmentPlanRequest, GetTreatmentPlanResponse,
    ListTasksRequest, ListTasksResponse, ListTreatmentPlansForPatientRequest,
    ListTreatmentPlansResponse, TaskPayload, TreatmentPlanCommand, TreatmentPlanPayload,
    TreatmentPlanQuery, TreatmentPlanRepository, TreatmentPlanRepositoryError,
    unknown_task_error, unknown_treatment_plan_error,
};
use crate::domain::{Error, TreatmentPlan};

fn map_repository_error(error: TreatmentPlanRepositoryError) -> Error {
    match error {
        TreatmentPlanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("treatment plan repository unavailable: {message}"))
        }
        TreatmentPlanRepositoryError::Query { message } => {
            Error::internal(format!("treatment plan repository error: {message}"))
        }
    }
}

/// Treatment plan service implementing the command driving port.
#[derive(Clone)]
pub struct TreatmentPlanCommandService<R> {
    plan_repo: Arc<R>,
}

impl<R> TreatmentPlanCommandService<R> {
    /// Create a new command service with the treatment plan repository.
    pub fn new(plan_repo: Arc<R>) -> Self {
        Self { plan_repo }
    }
}

impl<R> TreatmentPlanCommandService<R>
where
    R: TreatmentPlanRepository,
{
    async fn load_plan(&self, plan_id: Uuid) -> Result<TreatmentPlan, Error> {
        self.plan_repo
            .find_by_id(&plan_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_treatment_plan_error("treatmentPlanId", plan_id))
    }
}

#[async_trait]
impl<R> TreatmentPlanCommand for TreatmentPlanCommandService<R>
where
    R: TreatmentPlanRepository,
{
    async fn create_plan(
        &self,
        request: CreateTreatmentPlanRequest,
    ) -> Result<CreateTreatmentPlanResponse, Error> {
        let plan = request.plan.into_entity(Uuid::new_v4()).map_err(|err| {
            Error::invalid_request(format!("invalid treatment plan payload: {err}"))
        })?;

        self.plan_repo
            .save(&plan)
            .await
            .map_err(map_repository_error)?;

        Ok(CreateTreatmentPlanResponse { plan: plan.into() })
    }

    async fn add_task(&self, request: AddTaskRequest) -> Result<AttachRecordResponse, Error> {
        let plan = self.load_plan(request.treatment_plan_id).await?;
        let task = request
            .task
            .into_record(Uuid::new_v4(), plan.id())
            .map_err(|err| Error::invalid_request(format!("invalid task payload: {err}")))?;

        self.plan_repo
            .save_task(&task)
            .await
            .map_err(map_repository_error)?;

        Ok(AttachRecordResponse { plan: plan.into() })
    }

    async fn add_biological_function(
        &self,
        request: AddBiologicalFunctionRequest,
    ) -> Result<AttachRecordResponse, Error> {
        let plan = self.load_plan(request.treatment_plan_id).await?;
        let record = request
            .record
            .into_record(Uuid::new_v4(), plan.id())
            .map_err(|err| {
                Error::invalid_request(format!("invalid biological function payload: {err}"))
            })?;

        self.plan_repo
            .add_biological_function(&record)
            .await
            .map_err(map_repository_error)?;

        Ok(AttachRecordResponse { plan: plan.into() })
    }

    async fn add_diagnostic(
        &self,
        request: AddDiagnosticRequest,
    ) -> Result<AttachRecordResponse, Error> {
        let plan = self.load_plan(request.treatment_plan_id).await?;
        let record = request
            .record
            .into_record(Uuid::new_v4(), plan.id())
            .map_err(|err| Error::invalid_request(format!("invalid diagnostic payload: {err}")))?;

        self.plan_repo
            .add_diagnostic(&record)
            .await
            .map_err(map_repository_error)?;

        Ok(AttachRecordResponse { plan: plan.into() })
    }

    async fn add_patient_state(
        &self,
        request: AddPatientStateRequest,
    ) -> Result<AttachRecordResponse, Error> {
        let plan = self.load_plan(request.treatment_plan_id).await?;
        let record = request
            .record
            .into_record(Uuid::new_v4(), plan.id())
            .map_err(|err| {
                Error::invalid_request(format!("invalid patient state payload: {err}"))
            })?;

        self.plan_repo
            .add_patient_state(&record)
            .await
            .map_err(map_repository_error)?;

        Ok(AttachRecordResponse { plan: plan.into() })
    }

    async fn execute_task(
        &self,
        request: ExecuteTaskRequest,
    ) -> Result<ExecuteTaskResponse, Error> {
        let task = self
            .plan_repo
            .find_task_by_id(&request.task_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_task_error(request.task_id))?;

        let executed = task.execute();
        self.plan_repo
            .save_task(&executed)
            .await
            .map_err(map_repository_error)?;

        Ok(ExecuteTaskResponse {
            task: executed.into(),
        })
    }
}

/// Treatment plan service implementing the query driving port.
#[derive(Clone)]
pub struct TreatmentPlanQueryService<R> {
    plan_repo: Arc<R>,
}

impl<R> TreatmentPlanQueryService<R> {
    /// Create a new query service with the treatment plan repository.
    pub fn new(plan_repo: Arc<R>) -> Self {
        Self { plan_repo }
    }
}

#[async_trait]
impl<R> TreatmentPlanQuery for TreatmentPlanQueryService<R>
where
    R: TreatmentPlanRepository,
{
    async fn get_plan(
        &self,
        request: GetTreatmentPlanRequest,
    ) -> Result<GetTreatmentPlanResponse, Error> {
        let plan = self
            .plan_repo
            .find_by_id(&request.treatment_plan_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                unknown_treatment_plan_error("treatmentPlanId", request.treatment_plan_id)
            })?;

        Ok(GetTreatmentPlanResponse { plan: plan.into() })
    }

    async fn list_plans_for_patient(
        &self,
        request: ListTreatmentPlansForPatientRequest,
    ) -> Result<ListTreatmentPlansResponse, Error> {
        let plans = self
            .plan_repo
            .list_by_patient_id(&request.patient_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListTreatmentPlansResponse {
            plans: plans.into_iter().map(TreatmentPlanPayload::from).collect(),
        })
    }

    async fn list_tasks(&self, request: ListTasksRequest) -> Result<ListTasksResponse, Error> {
        let tasks = self
            .plan_repo
            .list_tasks(&request.treatment_plan_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListTasksResponse {
            tasks: tasks.into_iter().map(TaskPayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "treatment_plan_service_tests.rs"]
mod tests;
