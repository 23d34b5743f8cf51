//! Builders for HTTP state ports backed by Diesel adapters or fixtures.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{
    FixtureLoginService, FixturePatientCommand, FixturePatientQuery, FixturePrescriptionCommand,
    FixturePrescriptionQuery, FixtureProfessionalCommand, FixtureProfessionalQuery,
    FixtureSessionCommand, FixtureSessionQuery, FixtureTreatmentPlanCommand,
    FixtureTreatmentPlanQuery, FixtureUsersQuery, LoginService, PatientCommand, PatientQuery,
    PrescriptionCommand, PrescriptionQuery, ProfessionalCommand, ProfessionalQuery, SessionCommand,
    SessionQuery, TreatmentPlanCommand, TreatmentPlanQuery, UsersQuery,
};
use backend::domain::{
    PatientCommandService, PatientQueryService, PrescriptionCommandService,
    PrescriptionQueryService, ProfessionalCommandService, ProfessionalQueryService,
    SessionCommandService, SessionQueryService, TreatmentPlanCommandService,
    TreatmentPlanQueryService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DieselLoginService, DieselPatientRepository, DieselPrescriptionRepository,
    DieselProfessionalRepository, DieselSessionRepository, DieselTreatmentPlanRepository,
    DieselUserRepository, DieselUsersQuery,
};

use super::ServerConfig;

/// Build a command/query service pair from the pool when one is configured,
/// otherwise fall back to fixture implementations.
fn build_service_pair<Pool, Cmd, Query, MakeServices>(
    pool: &Option<Pool>,
    make_services: MakeServices,
    fixtures: (Arc<Cmd>, Arc<Query>),
) -> (Arc<Cmd>, Arc<Query>)
where
    Cmd: ?Sized + 'static,
    Query: ?Sized + 'static,
    MakeServices: FnOnce(&Pool) -> (Arc<Cmd>, Arc<Query>),
{
    match pool {
        Some(pool) => make_services(pool),
        None => fixtures,
    }
}

fn build_login_users_pair_with_pool<Pool>(
    pool: &Option<Pool>,
    make_services: impl FnOnce(&Pool) -> (Arc<dyn LoginService>, Arc<dyn UsersQuery>),
) -> (Arc<dyn LoginService>, Arc<dyn UsersQuery>) {
    build_service_pair(
        pool,
        make_services,
        (
            Arc::new(FixtureLoginService) as Arc<dyn LoginService>,
            Arc::new(FixtureUsersQuery) as Arc<dyn UsersQuery>,
        ),
    )
}

fn build_login_users_pair(config: &ServerConfig) -> (Arc<dyn LoginService>, Arc<dyn UsersQuery>) {
    build_login_users_pair_with_pool(&config.db_pool, |pool| {
        (
            Arc::new(DieselLoginService::new(DieselUserRepository::new(
                pool.clone(),
            ))),
            Arc::new(DieselUsersQuery::new(DieselUserRepository::new(
                pool.clone(),
            ))),
        )
    })
}

macro_rules! build_aggregate_pair {
    (
        $fn_name:ident,
        $cmd_trait:ty,
        $query_trait:ty,
        $repo:ty,
        $cmd_service:ident,
        $query_service:ident,
        $fixture_cmd:path,
        $fixture_query:path
    ) => {
        fn $fn_name(config: &ServerConfig) -> (Arc<$cmd_trait>, Arc<$query_trait>) {
            build_service_pair(
                &config.db_pool,
                |pool| {
                    let repo = Arc::new(<$repo>::new(pool.clone()));
                    (
                        Arc::new($cmd_service::new(repo.clone())) as Arc<$cmd_trait>,
                        Arc::new($query_service::new(repo)) as Arc<$query_trait>,
                    )
                },
                (
                    Arc::new($fixture_cmd) as Arc<$cmd_trait>,
                    Arc::new($fixture_query) as Arc<$query_trait>,
                ),
            )
        }
    };
}

build_aggregate_pair!(
    build_patients_pair,
    dyn PatientCommand,
    dyn PatientQuery,
    DieselPatientRepository,
    PatientCommandService,
    PatientQueryService,
    FixturePatientCommand,
    FixturePatientQuery
);

build_aggregate_pair!(
    build_professionals_pair,
    dyn ProfessionalCommand,
    dyn ProfessionalQuery,
    DieselProfessionalRepository,
    ProfessionalCommandService,
    ProfessionalQueryService,
    FixtureProfessionalCommand,
    FixtureProfessionalQuery
);

build_aggregate_pair!(
    build_sessions_pair,
    dyn SessionCommand,
    dyn SessionQuery,
    DieselSessionRepository,
    SessionCommandService,
    SessionQueryService,
    FixtureSessionCommand,
    FixtureSessionQuery
);

build_aggregate_pair!(
    build_treatment_plans_pair,
    dyn TreatmentPlanCommand,
    dyn TreatmentPlanQuery,
    DieselTreatmentPlanRepository,
    TreatmentPlanCommandService,
    TreatmentPlanQueryService,
    FixtureTreatmentPlanCommand,
    FixtureTreatmentPlanQuery
);

/// Prescription commands verify treatment plan bindings, so the command side
/// adds a plan repository next to the shared prescription repository.
fn build_prescriptions_pair(
    config: &ServerConfig,
) -> (Arc<dyn PrescriptionCommand>, Arc<dyn PrescriptionQuery>) {
    build_service_pair(
        &config.db_pool,
        |pool| {
            let prescription_repo = Arc::new(DieselPrescriptionRepository::new(pool.clone()));
            let plan_repo = Arc::new(DieselTreatmentPlanRepository::new(pool.clone()));
            (
                Arc::new(PrescriptionCommandService::new(
                    prescription_repo.clone(),
                    plan_repo,
                )) as Arc<dyn PrescriptionCommand>,
                Arc::new(PrescriptionQueryService::new(prescription_repo))
                    as Arc<dyn PrescriptionQuery>,
            )
        },
        (
            Arc::new(FixturePrescriptionCommand) as Arc<dyn PrescriptionCommand>,
            Arc::new(FixturePrescriptionQuery) as Arc<dyn PrescriptionQuery>,
        ),
    )
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (login, users) = build_login_users_pair(config);
    let (patients, patients_query) = build_patients_pair(config);
    let (professionals, professionals_query) = build_professionals_pair(config);
    let (sessions, sessions_query) = build_sessions_pair(config);
    let (prescriptions, prescriptions_query) = build_prescriptions_pair(config);
    let (treatment_plans, treatment_plans_query) = build_treatment_plans_pair(config);

    web::Data::new(HttpState::new(HttpStatePorts {
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
    }))
}
