//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered login identities with their usernames and audit
    /// timestamps. The `id` column is the primary key (UUID v4).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login name (max 32 characters).
        username -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Patient profiles table.
    ///
    /// One row per patient registered with the clinic, linked to the owning
    /// user account and the responsible professional.
    patients (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Legal name as shown in the clinic record (max 128 characters).
        full_name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Contact phone number (max 20 characters).
        phone -> Varchar,
        /// Date of birth (no time component).
        birth_date -> Date,
        /// Identity-layer account owning this profile.
        user_id -> Uuid,
        /// Professional responsible for this patient.
        professional_id -> Uuid,
        /// Whether the clinical history has been completed.
        clinical_history_status -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Professional profiles table.
    professionals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Legal name as shown in the clinic record (max 128 characters).
        full_name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Contact phone number (max 20 characters).
        phone -> Varchar,
        /// Date of birth (no time component).
        birth_date -> Date,
        /// Identity-layer account owning this profile.
        user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clinical sessions (appointments) table.
    sessions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Patient attending the appointment.
        patient_id -> Uuid,
        /// Professional leading the appointment.
        professional_id -> Uuid,
        /// Scheduled date and time of the appointment.
        session_date -> Timestamptz,
        /// Treatment plan this appointment belongs to, when linked.
        treatment_plan_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clinical notes table.
    ///
    /// Append-only child records of sessions; rows are never updated after
    /// insertion, so there is no `updated_at` column.
    notes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Session this note belongs to.
        session_id -> Uuid,
        /// Free-text note body (max 2048 characters).
        content -> Text,
        /// Record creation timestamp; drives append-order reads.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Prescriptions table.
    ///
    /// Pill entries are stored as a JSONB array on the prescription row and
    /// re-validated through domain constructors when read back.
    prescriptions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Patient the prescription was issued to.
        patient_id -> Uuid,
        /// Prescribing professional.
        professional_id -> Uuid,
        /// Treatment plan this prescription supports, when bound.
        treatment_plan_id -> Nullable<Uuid>,
        /// First day the prescription applies.
        start_date -> Date,
        /// Last day the prescription applies.
        end_date -> Date,
        /// Pill entries in append order (JSONB array).
        pills -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Treatment plans table.
    treatment_plans (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Patient under care.
        patient_id -> Uuid,
        /// Professional responsible for the plan.
        professional_id -> Uuid,
        /// Goal and approach of the plan (max 512 characters).
        description -> Text,
        /// First day the plan applies.
        start_date -> Date,
        /// Last day the plan applies.
        end_date -> Date,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Treatment plan tasks table.
    ///
    /// Task execution updates `status` in place, so this table keeps the
    /// full audit timestamp pair.
    tasks (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Plan this task belongs to.
        treatment_plan_id -> Uuid,
        /// Short imperative label (max 128 characters).
        title -> Varchar,
        /// Longer guidance for the patient; may be empty.
        description -> Text,
        /// Lifecycle state: `pending` or `completed`.
        status -> Varchar,
        /// Record creation timestamp; drives append-order reads.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Wellbeing checks recorded against treatment plans.
    ///
    /// Append-only; rows are never updated after insertion.
    biological_functions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Plan this record belongs to.
        treatment_plan_id -> Uuid,
        /// Appetite rating (0..=10).
        hunger -> Int4,
        /// Hydration rating (0..=10).
        hydration -> Int4,
        /// Sleep quality rating (0..=10).
        sleep -> Int4,
        /// Energy level rating (0..=10).
        energy -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Clinical diagnostics recorded against treatment plans.
    ///
    /// Append-only; rows are never updated after insertion.
    diagnostics (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Plan this record belongs to.
        treatment_plan_id -> Uuid,
        /// Diagnosis label (max 128 characters).
        name -> Varchar,
        /// Clinical context; may be empty.
        description -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mood observations recorded against treatment plans.
    ///
    /// Append-only; rows are never updated after insertion.
    patient_states (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Plan this record belongs to.
        treatment_plan_id -> Uuid,
        /// Mood rating (0..=10).
        mood -> Int4,
        /// Free-text observation; may be empty.
        description -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
