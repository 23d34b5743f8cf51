//! PostgreSQL-backed `PrescriptionRepository` implementation using Diesel ORM.
//!
//! This adapter persists prescriptions with their pill entries stored as a
//! JSONB array on the prescription row. Pills re-validate through the domain
//! `Pill` deserialiser on the way back, so malformed stored payloads surface
//! as typed query errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PrescriptionRepository, PrescriptionRepositoryError};
use crate::domain::{Pill, Prescription, PrescriptionDraft};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPrescriptionRow, PrescriptionRow, PrescriptionUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::prescriptions;

/// Diesel-backed implementation of the prescription repository port.
#[derive(Clone)]
pub struct DieselPrescriptionRepository {
    pool: DbPool,
}

impl DieselPrescriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> PrescriptionRepositoryError {
    map_basic_pool_error(error, PrescriptionRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> PrescriptionRepositoryError {
    map_basic_diesel_error(
        error,
        PrescriptionRepositoryError::query,
        PrescriptionRepositoryError::connection,
    )
}

fn serialize_pills(
    prescription: &Prescription,
) -> Result<serde_json::Value, PrescriptionRepositoryError> {
    serde_json::to_value(prescription.pills())
        .map_err(|err| PrescriptionRepositoryError::query(format!("serialise pills: {err}")))
}

fn decode_pills(pills: serde_json::Value) -> Result<Vec<Pill>, PrescriptionRepositoryError> {
    serde_json::from_value(pills)
        .map_err(|err| PrescriptionRepositoryError::query(format!("decode pills: {err}")))
}

/// Convert a database row into a validated domain prescription.
fn row_to_prescription(
    row: PrescriptionRow,
) -> Result<Prescription, PrescriptionRepositoryError> {
    let PrescriptionRow {
        id,
        patient_id,
        professional_id,
        treatment_plan_id,
        start_date,
        end_date,
        pills,
        created_at: _,
        updated_at: _,
    } = row;

    let pills = decode_pills(pills)?;

    Prescription::new(PrescriptionDraft {
        id,
        patient_id,
        professional_id,
        treatment_plan_id,
        start_date,
        end_date,
        pills,
    })
    .map_err(|err| PrescriptionRepositoryError::query(err.to_string()))
}

#[async_trait]
impl PrescriptionRepository for DieselPrescriptionRepository {
    async fn save(&self, prescription: &Prescription) -> Result<(), PrescriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pills = serialize_pills(prescription)?;

        let new_row = NewPrescriptionRow {
            id: prescription.id(),
            patient_id: prescription.patient_id(),
            professional_id: prescription.professional_id(),
            treatment_plan_id: prescription.treatment_plan_id(),
            start_date: prescription.start_date(),
            end_date: prescription.end_date(),
            pills: &pills,
        };

        let update_row = PrescriptionUpdate {
            patient_id: prescription.patient_id(),
            professional_id: prescription.professional_id(),
            treatment_plan_id: Some(prescription.treatment_plan_id()),
            start_date: prescription.start_date(),
            end_date: prescription.end_date(),
            pills: &pills,
        };

        diesel::insert_into(prescriptions::table)
            .values(&new_row)
            .on_conflict(prescriptions::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        prescription_id: &Uuid,
    ) -> Result<Option<Prescription>, PrescriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = prescriptions::table
            .filter(prescriptions::id.eq(prescription_id))
            .select(PrescriptionRow::as_select())
            .first::<PrescriptionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_prescription).transpose()
    }

    async fn list_by_treatment_plan_id(
        &self,
        treatment_plan_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PrescriptionRow> = prescriptions::table
            .filter(prescriptions::treatment_plan_id.eq(treatment_plan_id))
            .order((prescriptions::created_at.asc(), prescriptions::id.asc()))
            .select(PrescriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_prescription).collect()
    }

    async fn list_by_professional_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PrescriptionRow> = prescriptions::table
            .filter(prescriptions::professional_id.eq(professional_id))
            .order((prescriptions::created_at.asc(), prescriptions::id.asc()))
            .select(PrescriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_prescription).collect()
    }

    async fn list_by_patient_id(
        &self,
        patient_id: &Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PrescriptionRow> = prescriptions::table
            .filter(prescriptions::patient_id.eq(patient_id))
            .order((prescriptions::created_at.asc(), prescriptions::id.asc()))
            .select(PrescriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_prescription).collect()
    }
}
