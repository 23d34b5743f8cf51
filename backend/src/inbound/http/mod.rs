//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod patients;
pub mod prescriptions;
pub mod professionals;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod treatment_plans;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;
