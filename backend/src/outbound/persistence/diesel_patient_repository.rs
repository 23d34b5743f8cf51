//! PostgreSQL-backed `PatientRepository` implementation using Diesel ORM.
//!
//! This adapter persists patient profiles and reconstructs them through the
//! validated domain constructors, so malformed stored rows surface as typed
//! query errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{Patient, PatientDraft, ProfileDetailsDraft};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPatientRow, PatientRow, PatientUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::patients;

/// Diesel-backed implementation of the patient repository port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    map_basic_pool_error(error, PatientRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    map_basic_diesel_error(
        error,
        PatientRepositoryError::query,
        PatientRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain patient.
fn row_to_patient(row: PatientRow) -> Result<Patient, PatientRepositoryError> {
    let PatientRow {
        id,
        full_name,
        email,
        phone,
        birth_date,
        user_id,
        professional_id,
        clinical_history_status,
        created_at: _,
        updated_at: _,
    } = row;

    Patient::new(PatientDraft {
        id,
        details: ProfileDetailsDraft {
            full_name,
            email,
            phone,
            birth_date,
            user_id,
        },
        professional_id,
        clinical_history_status,
    })
    .map_err(|err| PatientRepositoryError::query(err.to_string()))
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn save(&self, patient: &Patient) -> Result<(), PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = patient.details();

        let new_row = NewPatientRow {
            id: patient.id(),
            full_name: details.full_name(),
            email: details.email(),
            phone: details.phone(),
            birth_date: details.birth_date(),
            user_id: details.user_id(),
            professional_id: patient.professional_id(),
            clinical_history_status: patient.clinical_history_status(),
        };

        let update_row = PatientUpdate {
            full_name: details.full_name(),
            email: details.email(),
            phone: details.phone(),
            birth_date: details.birth_date(),
            user_id: details.user_id(),
            professional_id: patient.professional_id(),
            clinical_history_status: patient.clinical_history_status(),
        };

        diesel::insert_into(patients::table)
            .values(&new_row)
            .on_conflict(patients::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        patient_id: &Uuid,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = patients::table
            .filter(patients::id.eq(patient_id))
            .select(PatientRow::as_select())
            .first::<PatientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_patient).transpose()
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = patients::table
            .filter(patients::user_id.eq(user_id))
            .select(PatientRow::as_select())
            .first::<PatientRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_patient).transpose()
    }

    async fn list_by_professional_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Vec<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatientRow> = patients::table
            .filter(patients::professional_id.eq(professional_id))
            .order((patients::created_at.asc(), patients::id.asc()))
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_patient).collect()
    }
}
