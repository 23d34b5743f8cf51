//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, PatientCommand, PatientQuery, PrescriptionCommand, PrescriptionQuery,
    ProfessionalCommand, ProfessionalQuery, SessionCommand, SessionQuery, TreatmentPlanCommand,
    TreatmentPlanQuery, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub patients: Arc<dyn PatientCommand>,
    pub patients_query: Arc<dyn PatientQuery>,
    pub professionals: Arc<dyn ProfessionalCommand>,
    pub professionals_query: Arc<dyn ProfessionalQuery>,
    pub sessions: Arc<dyn SessionCommand>,
    pub sessions_query: Arc<dyn SessionQuery>,
    pub prescriptions: Arc<dyn PrescriptionCommand>,
    pub prescriptions_query: Arc<dyn PrescriptionQuery>,
    pub treatment_plans: Arc<dyn TreatmentPlanCommand>,
    pub treatment_plans_query: Arc<dyn TreatmentPlanQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub patients: Arc<dyn PatientCommand>,
    pub patients_query: Arc<dyn PatientQuery>,
    pub professionals: Arc<dyn ProfessionalCommand>,
    pub professionals_query: Arc<dyn ProfessionalQuery>,
    pub sessions: Arc<dyn SessionCommand>,
    pub sessions_query: Arc<dyn SessionQuery>,
    pub prescriptions: Arc<dyn PrescriptionCommand>,
    pub prescriptions_query: Arc<dyn PrescriptionQuery>,
    pub treatment_plans: Arc<dyn TreatmentPlanCommand>,
    pub treatment_plans_query: Arc<dyn TreatmentPlanQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureLoginService, FixturePatientCommand, FixturePatientQuery,
    ///     FixturePrescriptionCommand, FixturePrescriptionQuery, FixtureProfessionalCommand,
    ///     FixtureProfessionalQuery, FixtureSessionCommand, FixtureSessionQuery,
    ///     FixtureTreatmentPlanCommand, FixtureTreatmentPlanQuery, FixtureUsersQuery,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     users: Arc::new(FixtureUsersQuery),
    ///     patients: Arc::new(FixturePatientCommand),
    ///     patients_query: Arc::new(FixturePatientQuery),
    ///     professionals: Arc::new(FixtureProfessionalCommand),
    ///     professionals_query: Arc::new(FixtureProfessionalQuery),
    ///     sessions: Arc::new(FixtureSessionCommand),
    ///     sessions_query: Arc::new(FixtureSessionQuery),
    ///     prescriptions: Arc::new(FixturePrescriptionCommand),
    ///     prescriptions_query: Arc::new(FixturePrescriptionQuery),
    ///     treatment_plans: Arc::new(FixtureTreatmentPlanCommand),
    ///     treatment_plans_query: Arc::new(FixtureTreatmentPlanQuery),
    /// };
    /// let state = HttpState::new(ports);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            patients,
            patients_query,
            professionals,
            professionals_query,
            sessions,
            sessions_query,
            prescriptions,
            prescriptions_query,
            treatment_plans,
            treatment_plans_query,
        } = ports;
        Self {
            login,
            users,
            patients,
            patients_query,
            professionals,
            professionals_query,
            sessions,
            sessions_query,
            prescriptions,
            prescriptions_query,
            treatment_plans,
            treatment_plans_query,
        }
    }
}
