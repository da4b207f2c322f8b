use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full patient profile. The password hash is never selected into this type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub id_card: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Column list matching [`Patient`], for SELECT/RETURNING clauses.
pub const PATIENT_COLUMNS: &str =
    "id, full_name, email, id_card, phone, gender, date_of_birth, address, created_at";

/// Trimmed view used when a hospital lists or looks up patients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PatientSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub id_card: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Internal login lookup; the only place the hash leaves the database.
#[derive(Debug, FromRow)]
pub struct PatientCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientDashboard {
    pub total_appointments: i64,
    pub pending_appointments: i64,
    pub confirmed_appointments: i64,
    pub completed_appointments: i64,
    pub cancelled_appointments: i64,
    pub medical_records: i64,
}
