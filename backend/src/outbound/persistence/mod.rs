//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Async-safe pooling**: Connections are managed via `bb8` pools with
//!   proper async integration through `diesel-async`.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, PoolConfig, DieselPatientRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/clinic");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselPatientRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_login_service;
mod diesel_patient_repository;
mod diesel_prescription_repository;
mod diesel_professional_repository;
mod diesel_session_repository;
mod diesel_treatment_plan_repository;
mod diesel_user_repository;
mod diesel_users_query;
mod models;
mod pool;
mod schema;
mod user_persistence_error_mapping;

pub use diesel_login_service::DieselLoginService;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_prescription_repository::DieselPrescriptionRepository;
pub use diesel_professional_repository::DieselProfessionalRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use diesel_treatment_plan_repository::DieselTreatmentPlanRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_users_query::DieselUsersQuery;
pub use pool::{DbPool, PoolConfig, PoolError};
