//! PostgreSQL-backed `ProfessionalRepository` implementation using Diesel ORM.
//!
//! This adapter persists professional profiles and reconstructs them through
//! the validated domain constructors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProfessionalRepository, ProfessionalRepositoryError};
use crate::domain::{Professional, ProfessionalDraft, ProfileDetailsDraft};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfessionalRow, ProfessionalRow, ProfessionalUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::professionals;

/// Diesel-backed implementation of the professional repository port.
#[derive(Clone)]
pub struct DieselProfessionalRepository {
    pool: DbPool,
}

impl DieselProfessionalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> ProfessionalRepositoryError {
    map_basic_pool_error(error, ProfessionalRepositoryError::connection)
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ProfessionalRepositoryError {
    map_basic_diesel_error(
        error,
        ProfessionalRepositoryError::query,
        ProfessionalRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain professional.
fn row_to_professional(row: ProfessionalRow) -> Result<Professional, ProfessionalRepositoryError> {
    let ProfessionalRow {
        id,
        full_name,
        email,
        phone,
        birth_date,
        user_id,
        created_at: _,
        updated_at: _,
    } = row;

    Professional::new(ProfessionalDraft {
        id,
        details: ProfileDetailsDraft {
            full_name,
            email,
            phone,
            birth_date,
            user_id,
        },
    })
    .map_err(|err| ProfessionalRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ProfessionalRepository for DieselProfessionalRepository {
    async fn save(&self, professional: &Professional) -> Result<(), ProfessionalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = professional.details();

        let new_row = NewProfessionalRow {
            id: professional.id(),
            full_name: details.full_name(),
            email: details.email(),
            phone: details.phone(),
            birth_date: details.birth_date(),
            user_id: details.user_id(),
        };

        let update_row = ProfessionalUpdate {
            full_name: details.full_name(),
            email: details.email(),
            phone: details.phone(),
            birth_date: details.birth_date(),
            user_id: details.user_id(),
        };

        diesel::insert_into(professionals::table)
            .values(&new_row)
            .on_conflict(professionals::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        professional_id: &Uuid,
    ) -> Result<Option<Professional>, ProfessionalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = professionals::table
            .filter(professionals::id.eq(professional_id))
            .select(ProfessionalRow::as_select())
            .first::<ProfessionalRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_professional).transpose()
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<Professional>, ProfessionalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = professionals::table
            .filter(professionals::user_id.eq(user_id))
            .select(ProfessionalRow::as_select())
            .first::<ProfessionalRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_professional).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Professional>, ProfessionalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProfessionalRow> = professionals::table
            .order((professionals::created_at.asc(), professionals::id.asc()))
            .select(ProfessionalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_professional).collect()
    }
}
