//! Treatment plan HTTP handlers.
//!
//! ```text
//! POST /api/v1/treatment-plans
//! GET /api/v1/treatment-plans/{treatmentPlanId}
//! GET /api/v1/treatment-plans/patient/{patientId}
//! PUT /api/v1/treatment-plans/{treatmentPlanId}/tasks
//! PUT /api/v1/treatment-plans/{treatmentPlanId}/biological-functions
//! PUT /api/v1/treatment-plans/{treatmentPlanId}/diagnostics
//! PUT /api/v1/treatment-plans/{treatmentPlanId}/patient-states
//! PUT /api/v1/treatment-plans/tasks/{taskId}/execute
//! GET /api/v1/treatment-plans/{treatmentPlanId}/tasks
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    AddBiologicalFunctionRequest, AddDiagnosticRequest, AddPatientStateRequest, AddTaskRequest,
    BiologicalFunctionDraftPayload, CreateTreatmentPlanRequest, DiagnosticDraftPayload,
    ExecuteTaskRequest, GetTreatmentPlanRequest, ListTasksRequest,
    ListTreatmentPlansForPatientRequest, PatientStateDraftPayload, TaskDraftPayload, TaskPayload,
    TreatmentPlanDraftPayload, TreatmentPlanPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_required_date, parse_required_uuid, parse_uuid, require_field,
};

/// Request payload for opening a treatment plan. Fields are optional on the
/// wire so their absence reports `missing_field` rather than a blanket
/// deserialization error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreatmentPlanRequestBody {
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    #[schema(format = "uuid")]
    pub professional_id: Option<String>,
    pub description: Option<String>,
    #[schema(format = "date")]
    pub start_date: Option<String>,
    #[schema(format = "date")]
    pub end_date: Option<String>,
}

/// Treatment plan resource returned by the plan endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlanResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub patient_id: String,
    #[schema(format = "uuid")]
    pub professional_id: String,
    pub description: String,
    #[schema(format = "date")]
    pub start_date: String,
    #[schema(format = "date")]
    pub end_date: String,
}

impl From<TreatmentPlanPayload> for TreatmentPlanResponseBody {
    fn from(value: TreatmentPlanPayload) -> Self {
        Self {
            id: value.id.to_string(),
            patient_id: value.patient_id.to_string(),
            professional_id: value.professional_id.to_string(),
            description: value.description,
            start_date: value.start_date.to_string(),
            end_date: value.end_date.to_string(),
        }
    }
}

/// Request payload for attaching a pending task.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequestBody {
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Request payload for attaching a wellbeing check. Each level is scored on
/// the shared 0 to 10 scale.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBiologicalFunctionRequestBody {
    pub hunger: Option<i32>,
    pub hydration: Option<i32>,
    pub sleep: Option<i32>,
    pub energy: Option<i32>,
}

/// Request payload for attaching a diagnostic.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDiagnosticRequestBody {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Request payload for attaching a mood observation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPatientStateRequestBody {
    pub mood: Option<i32>,
    #[serde(default)]
    pub description: String,
}

/// Task resource returned when executing or listing tasks.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub treatment_plan_id: String,
    pub title: String,
    pub description: String,
    /// Either `pending` or `completed`.
    pub status: String,
}

impl From<TaskPayload> for TaskResponseBody {
    fn from(value: TaskPayload) -> Self {
        Self {
            id: value.id.to_string(),
            treatment_plan_id: value.treatment_plan_id.to_string(),
            title: value.title,
            description: value.description,
            status: value.status.to_string(),
        }
    }
}

fn parse_plan_draft(body: CreateTreatmentPlanRequestBody) -> Result<TreatmentPlanDraftPayload, Error> {
    Ok(TreatmentPlanDraftPayload {
        patient_id: parse_required_uuid(body.patient_id, FieldName::new("patientId"))?,
        professional_id: parse_required_uuid(body.professional_id, FieldName::new("professionalId"))?,
        description: require_field(body.description, FieldName::new("description"))?,
        start_date: parse_required_date(body.start_date, FieldName::new("startDate"))?,
        end_date: parse_required_date(body.end_date, FieldName::new("endDate"))?,
    })
}

/// Open a treatment plan for a patient.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::treatment_plans::{add_task, create_treatment_plan};
///
/// let app = App::new()
///     .service(web::scope("/api/v1").service(create_treatment_plan).service(add_task));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/treatment-plans",
    request_body = CreateTreatmentPlanRequestBody,
    responses(
        (status = 201, description = "Treatment plan opened", body = TreatmentPlanResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "createTreatmentPlan",
    security(("SessionCookie" = []))
)]
#[post("/treatment-plans")]
pub async fn create_treatment_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTreatmentPlanRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let draft = parse_plan_draft(payload.into_inner())?;

    let response = state
        .treatment_plans
        .create_plan(CreateTreatmentPlanRequest { plan: draft })
        .await?;

    Ok(HttpResponse::Created().json(TreatmentPlanResponseBody::from(response.plan)))
}

/// Fetch a treatment plan by id.
#[utoipa::path(
    get,
    path = "/api/v1/treatment-plans/{treatmentPlanId}",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Plan identifier")),
    responses(
        (status = 200, description = "Treatment plan", body = TreatmentPlanResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "getTreatmentPlan",
    security(("SessionCookie" = []))
)]
#[get("/treatment-plans/{treatmentPlanId}")]
pub async fn get_treatment_plan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TreatmentPlanResponseBody>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;

    let response = state
        .treatment_plans_query
        .get_plan(GetTreatmentPlanRequest { treatment_plan_id })
        .await?;

    Ok(web::Json(TreatmentPlanResponseBody::from(response.plan)))
}

/// List the treatment plans recorded for a patient.
#[utoipa::path(
    get,
    path = "/api/v1/treatment-plans/patient/{patientId}",
    params(("patientId" = String, Path, format = "uuid", description = "Patient under treatment")),
    responses(
        (status = 200, description = "Treatment plans", body = [TreatmentPlanResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "listTreatmentPlansForPatient",
    security(("SessionCookie" = []))
)]
#[get("/treatment-plans/patient/{patientId}")]
pub async fn list_treatment_plans_for_patient(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TreatmentPlanResponseBody>>> {
    session.require_user_id()?;
    let patient_id = parse_uuid(path.into_inner(), FieldName::new("patientId"))?;

    let response = state
        .treatment_plans_query
        .list_plans_for_patient(ListTreatmentPlansForPatientRequest { patient_id })
        .await?;

    Ok(web::Json(
        response
            .plans
            .into_iter()
            .map(TreatmentPlanResponseBody::from)
            .collect(),
    ))
}

/// Attach a pending task to an existing plan.
#[utoipa::path(
    put,
    path = "/api/v1/treatment-plans/{treatmentPlanId}/tasks",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Plan identifier")),
    request_body = AddTaskRequestBody,
    responses(
        (status = 200, description = "Task attached; updated plan", body = TreatmentPlanResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "addTask",
    security(("SessionCookie" = []))
)]
#[put("/treatment-plans/{treatmentPlanId}/tasks")]
pub async fn add_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddTaskRequestBody>,
) -> ApiResult<web::Json<TreatmentPlanResponseBody>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;
    let body = payload.into_inner();
    let task = TaskDraftPayload {
        title: require_field(body.title, FieldName::new("title"))?,
        description: body.description,
    };

    let response = state
        .treatment_plans
        .add_task(AddTaskRequest {
            treatment_plan_id,
            task,
        })
        .await?;

    Ok(web::Json(TreatmentPlanResponseBody::from(response.plan)))
}

/// Attach a wellbeing check to an existing plan.
#[utoipa::path(
    put,
    path = "/api/v1/treatment-plans/{treatmentPlanId}/biological-functions",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Plan identifier")),
    request_body = AddBiologicalFunctionRequestBody,
    responses(
        (status = 200, description = "Wellbeing check attached; updated plan", body = TreatmentPlanResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "addBiologicalFunction",
    security(("SessionCookie" = []))
)]
#[put("/treatment-plans/{treatmentPlanId}/biological-functions")]
pub async fn add_biological_function(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddBiologicalFunctionRequestBody>,
) -> ApiResult<web::Json<TreatmentPlanResponseBody>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;
    let body = payload.into_inner();
    let record = BiologicalFunctionDraftPayload {
        hunger: require_field(body.hunger, FieldName::new("hunger"))?,
        hydration: require_field(body.hydration, FieldName::new("hydration"))?,
        sleep: require_field(body.sleep, FieldName::new("sleep"))?,
        energy: require_field(body.energy, FieldName::new("energy"))?,
    };

    let response = state
        .treatment_plans
        .add_biological_function(AddBiologicalFunctionRequest {
            treatment_plan_id,
            record,
        })
        .await?;

    Ok(web::Json(TreatmentPlanResponseBody::from(response.plan)))
}

/// Attach a diagnostic to an existing plan.
#[utoipa::path(
    put,
    path = "/api/v1/treatment-plans/{treatmentPlanId}/diagnostics",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Plan identifier")),
    request_body = AddDiagnosticRequestBody,
    responses(
        (status = 200, description = "Diagnostic attached; updated plan", body = TreatmentPlanResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "addDiagnostic",
    security(("SessionCookie" = []))
)]
#[put("/treatment-plans/{treatmentPlanId}/diagnostics")]
pub async fn add_diagnostic(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddDiagnosticRequestBody>,
) -> ApiResult<web::Json<TreatmentPlanResponseBody>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;
    let body = payload.into_inner();
    let record = DiagnosticDraftPayload {
        name: require_field(body.name, FieldName::new("name"))?,
        description: body.description,
    };

    let response = state
        .treatment_plans
        .add_diagnostic(AddDiagnosticRequest {
            treatment_plan_id,
            record,
        })
        .await?;

    Ok(web::Json(TreatmentPlanResponseBody::from(response.plan)))
}

/// Attach a mood observation to an existing plan.
#[utoipa::path(
    put,
    path = "/api/v1/treatment-plans/{treatmentPlanId}/patient-states",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Plan identifier")),
    request_body = AddPatientStateRequestBody,
    responses(
        (status = 200, description = "Mood observation attached; updated plan", body = TreatmentPlanResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "addPatientState",
    security(("SessionCookie" = []))
)]
#[put("/treatment-plans/{treatmentPlanId}/patient-states")]
pub async fn add_patient_state(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddPatientStateRequestBody>,
) -> ApiResult<web::Json<TreatmentPlanResponseBody>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;
    let body = payload.into_inner();
    let record = PatientStateDraftPayload {
        mood: require_field(body.mood, FieldName::new("mood"))?,
        description: body.description,
    };

    let response = state
        .treatment_plans
        .add_patient_state(AddPatientStateRequest {
            treatment_plan_id,
            record,
        })
        .await?;

    Ok(web::Json(TreatmentPlanResponseBody::from(response.plan)))
}

/// Mark a task completed. Executing an already-completed task is a no-op.
#[utoipa::path(
    put,
    path = "/api/v1/treatment-plans/tasks/{taskId}/execute",
    params(("taskId" = String, Path, format = "uuid", description = "Task identifier")),
    responses(
        (status = 200, description = "Task completed", body = TaskResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "executeTask",
    security(("SessionCookie" = []))
)]
#[put("/treatment-plans/tasks/{taskId}/execute")]
pub async fn execute_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponseBody>> {
    session.require_user_id()?;
    let task_id = parse_uuid(path.into_inner(), FieldName::new("taskId"))?;

    let response = state
        .treatment_plans
        .execute_task(ExecuteTaskRequest { task_id })
        .await?;

    Ok(web::Json(TaskResponseBody::from(response.task)))
}

/// List the tasks attached to a plan.
#[utoipa::path(
    get,
    path = "/api/v1/treatment-plans/{treatmentPlanId}/tasks",
    params(("treatmentPlanId" = String, Path, format = "uuid", description = "Plan identifier")),
    responses(
        (status = 200, description = "Tasks", body = [TaskResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["treatment-plans"],
    operation_id = "listTasks",
    security(("SessionCookie" = []))
)]
#[get("/treatment-plans/{treatmentPlanId}/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TaskResponseBody>>> {
    session.require_user_id()?;
    let treatment_plan_id = parse_uuid(path.into_inner(), FieldName::new("treatmentPlanId"))?;

    let response = state
        .treatment_plans_query
        .list_tasks(ListTasksRequest { treatment_plan_id })
        .await?;

    Ok(web::Json(
        response
            .tasks
            .into_iter()
            .map(TaskResponseBody::from)
            .collect(),
    ))
}

#[cfg(test)]
#[path = "treatment_plans_tests.rs"]
mod tests;
