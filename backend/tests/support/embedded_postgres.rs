//! Shared embedded PostgreSQL helpers for integration tests.
//!
//! The database-backed suites all provision their schemas the same way:
//!
//! - Database creation and teardown go through `postgres` directly so Diesel
//!   transaction semantics cannot interfere with `DROP DATABASE`.
//! - Schema setup runs the embedded Diesel migrations, keeping test schemas
//!   in lockstep with `backend/migrations`.
//! - A migrated template database is cloned per test, which is much cheaper
//!   than re-running migrations for every suite.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use backend::domain::ports::UserPersistenceError;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "clinic_template";
const TEMPLATE_PROVISION_RETRIES: usize = 5;
const TEMPLATE_PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// Names the template after the migrations directory content so a migration
/// edit invalidates stale templates left over from earlier runs.
fn template_database_name() -> Result<String, UserPersistenceError> {
    let hash = hash_directory(migrations_dir())
        .map_err(|err| UserPersistenceError::query(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn new_test_database_name() -> String {
    format!("test_{}", Uuid::new_v4())
}

/// Runs one template-clone provisioning pass for a test database.
///
/// `attempt` annotates error messages with retry context. Succeeds only when
/// both template resolution and the clone itself succeed.
fn provision_template_database_attempt(
    cluster: &ClusterHandle,
    attempt: usize,
) -> Result<TemporaryDatabase, UserPersistenceError> {
    let template_name = ensure_template_database(cluster).map_err(|error| {
        UserPersistenceError::query(format!(
            "template check: attempt {attempt}/{TEMPLATE_PROVISION_RETRIES}: {error}"
        ))
    })?;
    let db_name = new_test_database_name();
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|error| {
            UserPersistenceError::query(format!(
                "create database from template: attempt {attempt}/{TEMPLATE_PROVISION_RETRIES}: {error:?}"
            ))
        })
}

/// Creates or reuses a template database with the latest migrations applied.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, UserPersistenceError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| UserPersistenceError::query(format!("template check: {err:?}")))?;

    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| UserPersistenceError::query(format!("create template: {err:?}")))?;

        let url = cluster.connection().database_url(&template_name);
        migrate_schema(&url)?;
    }

    Ok(template_name)
}

/// Provisions a temporary database cloned from the migration template.
///
/// Retries a handful of times because concurrent suites can race on
/// template creation inside a shared cluster.
pub fn provision_template_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, UserPersistenceError> {
    let mut last_error = None;
    for attempt in 1..=TEMPLATE_PROVISION_RETRIES {
        match provision_template_database_attempt(cluster, attempt) {
            Ok(database) => return Ok(database),
            Err(error) => last_error = Some(error),
        };
        if attempt < TEMPLATE_PROVISION_RETRIES {
            std::thread::sleep(TEMPLATE_PROVISION_RETRY_DELAY);
        }
    }

    Err(last_error.unwrap_or_else(|| {
        UserPersistenceError::query("create database from template: exhausted retries")
    }))
}

/// Runs all pending Diesel migrations against the test database.
pub fn migrate_schema(url: &str) -> Result<(), UserPersistenceError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| UserPersistenceError::connection(format!("{err:?}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserPersistenceError::query(format!("migration: {err:?}")))?;
    Ok(())
}

/// Drops the `users` table from the given database URL.
///
/// CASCADE also removes the tables referencing users (professionals,
/// patients, and everything hanging off those), simulating total schema
/// loss for the resilience scenarios.
pub fn drop_users_table(url: &str) -> Result<(), UserPersistenceError> {
    let mut client = Client::connect(url, NoTls)
        .map_err(|err| UserPersistenceError::connection(format_postgres_error(&err)))?;
    client
        .batch_execute("DROP TABLE IF EXISTS users CASCADE;")
        .map_err(|err| UserPersistenceError::query(format_postgres_error(&err)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Linkage checks for embedded postgres helpers.

    use super::*;

    #[test]
    fn drop_users_table_is_linked() {
        let _ = drop_users_table as fn(&str) -> Result<(), UserPersistenceError>;
    }
}
