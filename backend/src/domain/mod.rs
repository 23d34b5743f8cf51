//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed clinical entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Layout follows the hexagon: aggregate modules (`profiles`, `sessions`,
//! `prescriptions`, `treatment_plans`, `user`) own validation, `ports` holds
//! the boundary traits, and the `*_service` modules implement the driving
//! ports against repository ports.

pub mod auth;
pub mod error;
mod patient_service;
pub mod ports;
mod prescription_service;
pub mod prescriptions;
mod professional_service;
pub mod profiles;
mod session_service;
pub mod sessions;
pub mod trace_id;
mod treatment_plan_service;
pub mod treatment_plans;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::patient_service::{PatientCommandService, PatientQueryService};
pub use self::prescription_service::{PrescriptionCommandService, PrescriptionQueryService};
pub use self::prescriptions::{
    PILL_DESCRIPTION_MAX, PILL_NAME_MAX, Pill, PillDraft, Prescription, PrescriptionDraft,
    PrescriptionValidationError,
};
pub use self::professional_service::{ProfessionalCommandService, ProfessionalQueryService};
pub use self::profiles::{
    FULL_NAME_MAX, PHONE_MAX, PHONE_MIN, Patient, PatientDraft, Professional, ProfessionalDraft,
    ProfileDetails, ProfileDetailsDraft, ProfileValidationError,
};
pub use self::session_service::{SessionCommandService, SessionQueryService};
pub use self::sessions::{NOTE_CONTENT_MAX, Note, NoteValidationError, Session};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::treatment_plan_service::{TreatmentPlanCommandService, TreatmentPlanQueryService};
pub use self::treatment_plans::{
    BiologicalFunction, DESCRIPTION_MAX, Diagnostic, ParseTaskStatusError, PatientState,
    RATING_MAX, RATING_MIN, RatingMetric, TITLE_MAX, Task, TaskStatus, TreatmentPlan,
    TreatmentPlanDraft, TreatmentPlanValidationError,
};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
