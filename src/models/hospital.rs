use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub registration_no: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub departments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Column list matching [`Hospital`], for SELECT/RETURNING clauses.
pub const HOSPITAL_COLUMNS: &str =
    "id, name, email, registration_no, phone, address, departments, created_at";

/// Public directory entry shown to patients when booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HospitalSummary {
    pub id: Uuid,
    pub name: String,
    pub departments: Vec<String>,
    pub address: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct HospitalCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HospitalStats {
    pub staff: i64,
    pub patients_seen: i64,
    pub pending_appointments: i64,
    pub confirmed_appointments: i64,
    pub completed_appointments: i64,
    pub cancelled_appointments: i64,
    pub medical_records: i64,
}
