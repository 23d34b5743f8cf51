//! Driving port for treatment plan lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::treatment_plan_command::{
    TaskPayload, TreatmentPlanPayload, unknown_treatment_plan_error,
};
use crate::domain::Error;

/// Request to fetch a single treatment plan by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTreatmentPlanRequest {
    pub treatment_plan_id: Uuid,
}

/// Response carrying a single treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTreatmentPlanResponse {
    pub plan: TreatmentPlanPayload,
}

/// Request to list the treatment plans of a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTreatmentPlansForPatientRequest {
    pub patient_id: Uuid,
}

/// Response carrying zero or more treatment plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTreatmentPlansResponse {
    pub plans: Vec<TreatmentPlanPayload>,
}

/// Request to list the tasks attached to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksRequest {
    pub treatment_plan_id: Uuid,
}

/// Response carrying zero or more tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksResponse {
    pub tasks: Vec<TaskPayload>,
}

/// Driving port for treatment plan read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TreatmentPlanQuery: Send + Sync {
    /// Fetches a treatment plan by id.
    async fn get_plan(
        &self,
        request: GetTreatmentPlanRequest,
    ) -> Result<GetTreatmentPlanResponse, Error>;

    /// Lists the treatment plans recorded for a patient, oldest first.
    async fn list_plans_for_patient(
        &self,
        request: ListTreatmentPlansForPatientRequest,
    ) -> Result<ListTreatmentPlansResponse, Error>;

    /// Lists the tasks attached to a plan. A plan with no tasks (or an
    /// unknown id) produces an empty list.
    async fn list_tasks(&self, request: ListTasksRequest) -> Result<ListTasksResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTreatmentPlanQuery;

#[async_trait]
impl TreatmentPlanQuery for FixtureTreatmentPlanQuery {
    async fn get_plan(
        &self,
        request: GetTreatmentPlanRequest,
    ) -> Result<GetTreatmentPlanResponse, Error> {
        Err(unknown_treatment_plan_error(
            "treatmentPlanId",
            request.treatment_plan_id,
        ))
    }

    async fn list_plans_for_patient(
        &self,
        _request: ListTreatmentPlansForPatientRequest,
    ) -> Result<ListTreatmentPlansResponse, Error> {
        Ok(ListTreatmentPlansResponse { plans: Vec::new() })
    }

    async fn list_tasks(&self, _request: ListTasksRequest) -> Result<ListTasksResponse, Error> {
        Ok(ListTasksResponse { tasks: Vec::new() })
    }
}
