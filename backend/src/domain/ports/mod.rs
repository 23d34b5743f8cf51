//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod patient_command;
mod patient_query;
mod patient_repository;
mod prescription_command;
mod prescription_query;
mod prescription_repository;
mod professional_command;
mod professional_query;
mod professional_repository;
mod session_command;
mod session_query;
mod session_repository;
mod treatment_plan_command;
mod treatment_plan_query;
mod treatment_plan_repository;
mod user_repository;
mod users_query;

pub(crate) use patient_query::unknown_patient_error;
pub(crate) use prescription_command::unknown_prescription_error;
pub(crate) use professional_query::unknown_professional_error;
pub(crate) use session_command::unknown_session_error;
pub(crate) use treatment_plan_command::{unknown_task_error, unknown_treatment_plan_error};
pub(crate) use users_query::unknown_user_error;

pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use patient_command::MockPatientCommand;
pub use patient_command::{
    CreatePatientRequest, CreatePatientResponse, FixturePatientCommand, PatientCommand,
    PatientDraftPayload, PatientPayload,
};
#[cfg(test)]
pub use patient_query::MockPatientQuery;
pub use patient_query::{
    FixturePatientQuery, GetPatientForUserRequest, GetPatientRequest, GetPatientResponse,
    ListPatientsForProfessionalRequest, ListPatientsResponse, PatientQuery,
};
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{FixturePatientRepository, PatientRepository, PatientRepositoryError};
#[cfg(test)]
pub use prescription_command::MockPrescriptionCommand;
pub use prescription_command::{
    AddPillRequest, AddPillResponse, CreatePrescriptionRequest, CreatePrescriptionResponse,
    FixturePrescriptionCommand, PrescriptionCommand, PrescriptionDraftPayload, PrescriptionPayload,
};
#[cfg(test)]
pub use prescription_query::MockPrescriptionQuery;
pub use prescription_query::{
    FixturePrescriptionQuery, GetPrescriptionRequest, GetPrescriptionResponse,
    ListPrescriptionsForPatientRequest, ListPrescriptionsForProfessionalRequest,
    ListPrescriptionsForTreatmentPlanRequest, ListPrescriptionsResponse, PrescriptionQuery,
};
#[cfg(test)]
pub use prescription_repository::MockPrescriptionRepository;
pub use prescription_repository::{
    FixturePrescriptionRepository, PrescriptionRepository, PrescriptionRepositoryError,
};
#[cfg(test)]
pub use professional_command::MockProfessionalCommand;
pub use professional_command::{
    CreateProfessionalRequest, CreateProfessionalResponse, FixtureProfessionalCommand,
    ProfessionalCommand, ProfessionalDraftPayload, ProfessionalPayload,
};
#[cfg(test)]
pub use professional_query::MockProfessionalQuery;
pub use professional_query::{
    FixtureProfessionalQuery, GetProfessionalForUserRequest, GetProfessionalRequest,
    GetProfessionalResponse, ListProfessionalsResponse, ProfessionalQuery,
};
#[cfg(test)]
pub use professional_repository::MockProfessionalRepository;
pub use professional_repository::{
    FixtureProfessionalRepository, ProfessionalRepository, ProfessionalRepositoryError,
};
#[cfg(test)]
pub use session_command::MockSessionCommand;
pub use session_command::{
    AddNoteRequest, AddNoteResponse, CreateSessionRequest, CreateSessionResponse,
    FixtureSessionCommand, NoteDraftPayload, NotePayload, SessionCommand, SessionDraftPayload,
    SessionPayload,
};
#[cfg(test)]
pub use session_query::MockSessionQuery;
pub use session_query::{
    FixtureSessionQuery, GetSessionRequest, GetSessionResponse, ListNotesRequest,
    ListNotesResponse, ListSessionsForProfessionalRequest, ListSessionsForTreatmentPlanRequest,
    ListSessionsResponse, SessionQuery,
};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{FixtureSessionRepository, SessionRepository, SessionRepositoryError};
#[cfg(test)]
pub use treatment_plan_command::MockTreatmentPlanCommand;
pub use treatment_plan_command::{
    AddBiologicalFunctionRequest, AddDiagnosticRequest, AddPatientStateRequest, AddTaskRequest,
    AttachRecordResponse, BiologicalFunctionDraftPayload, CreateTreatmentPlanRequest,
    CreateTreatmentPlanResponse, DiagnosticDraftPayload, ExecuteTaskRequest, ExecuteTaskResponse,
    FixtureTreatmentPlanCommand, PatientStateDraftPayload, TaskDraftPayload, TaskPayload,
    TreatmentPlanCommand, TreatmentPlanDraftPayload, TreatmentPlanPayload,
};
#[cfg(test)]
pub use treatment_plan_query::MockTreatmentPlanQuery;
pub use treatment_plan_query::{
    FixtureTreatmentPlanQuery, GetTreatmentPlanRequest, GetTreatmentPlanResponse, ListTasksRequest,
    ListTasksResponse, ListTreatmentPlansForPatientRequest, ListTreatmentPlansResponse,
    TreatmentPlanQuery,
};
#[cfg(test)]
pub use treatment_plan_repository::MockTreatmentPlanRepository;
pub use treatment_plan_repository::{
    FixtureTreatmentPlanRepository, TreatmentPlanRepository, TreatmentPlanRepositoryError,
};
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UsersQuery};
