//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    biological_functions, diagnostics, notes, patient_states, patients, prescriptions,
    professionals, sessions, tasks, treatment_plans, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
}

// ---------------------------------------------------------------------------
// Profile models
// ---------------------------------------------------------------------------

/// Row struct for reading from the patients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: chrono::NaiveDate,
    pub user_id: Uuid,
    pub professional_id: Uuid,
    pub clinical_history_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new patient records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub(crate) struct NewPatientRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: chrono::NaiveDate,
    pub user_id: Uuid,
    pub professional_id: Uuid,
    pub clinical_history_status: bool,
}

/// Changeset struct for updating existing patient records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = patients)]
pub(crate) struct PatientUpdate<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: chrono::NaiveDate,
    pub user_id: Uuid,
    pub professional_id: Uuid,
    pub clinical_history_status: bool,
}

/// Row struct for reading from the professionals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = professionals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfessionalRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: chrono::NaiveDate,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new professional records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = professionals)]
pub(crate) struct NewProfessionalRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: chrono::NaiveDate,
    pub user_id: Uuid,
}

/// Changeset struct for updating existing professional records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = professionals)]
pub(crate) struct ProfessionalUpdate<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: chrono::NaiveDate,
    pub user_id: Uuid,
}

// ---------------------------------------------------------------------------
// Session and note models
// ---------------------------------------------------------------------------

/// Row struct for reading from the sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub session_date: DateTime<Utc>,
    pub treatment_plan_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new session records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub session_date: DateTime<Utc>,
    pub treatment_plan_id: Option<Uuid>,
}

/// Changeset struct for updating existing session records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = sessions)]
pub(crate) struct SessionUpdate {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub session_date: DateTime<Utc>,
    // Wrapped in a second Option so saving a standalone session clears a
    // previously stored plan link rather than skipping the column.
    pub treatment_plan_id: Option<Option<Uuid>>,
}

/// Row struct for reading from the notes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NoteRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending note records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notes)]
pub(crate) struct NewNoteRow<'a> {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: &'a str,
}

// ---------------------------------------------------------------------------
// Prescription models
// ---------------------------------------------------------------------------

/// Row struct for reading from the prescriptions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = prescriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PrescriptionRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub treatment_plan_id: Option<Uuid>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub pills: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new prescription records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = prescriptions)]
pub(crate) struct NewPrescriptionRow<'a> {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub treatment_plan_id: Option<Uuid>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub pills: &'a serde_json::Value,
}

/// Changeset struct for updating existing prescription records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = prescriptions)]
pub(crate) struct PrescriptionUpdate<'a> {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    // Double Option so an unbound prescription clears a stored plan link.
    pub treatment_plan_id: Option<Option<Uuid>>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub pills: &'a serde_json::Value,
}

// ---------------------------------------------------------------------------
// Treatment plan models
// ---------------------------------------------------------------------------

/// Row struct for reading from the treatment_plans table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = treatment_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TreatmentPlanRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub description: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new treatment plan records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = treatment_plans)]
pub(crate) struct NewTreatmentPlanRow<'a> {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub description: &'a str,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// Changeset struct for updating existing treatment plan records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = treatment_plans)]
pub(crate) struct TreatmentPlanUpdate<'a> {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub description: &'a str,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// Row struct for reading from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub treatment_plan_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub id: Uuid,
    pub treatment_plan_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

/// Changeset struct for updating existing task records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub(crate) struct TaskUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

// ---------------------------------------------------------------------------
// Append-only plan record models
// ---------------------------------------------------------------------------
// These tables have no read path, so only insertable structs exist.

/// Insertable struct for appending wellbeing check records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = biological_functions)]
pub(crate) struct NewBiologicalFunctionRow {
    pub id: Uuid,
    pub treatment_plan_id: Uuid,
    pub hunger: i32,
    pub hydration: i32,
    pub sleep: i32,
    pub energy: i32,
}

/// Insertable struct for appending diagnostic records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = diagnostics)]
pub(crate) struct NewDiagnosticRow<'a> {
    pub id: Uuid,
    pub treatment_plan_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
}

/// Insertable struct for appending mood observation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patient_states)]
pub(crate) struct NewPatientStateRow<'a> {
    pub id: Uuid,
    pub treatment_plan_id: Uuid,
    pub mood: i32,
    pub description: &'a str,
}
