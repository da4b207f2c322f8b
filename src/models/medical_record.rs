use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Prescription {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// Immutable history entry. Only diagnosis and notes may ever be updated,
/// and only by the hospital that wrote the record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub diagnosis: String,
    pub notes: Option<String>,
    /// Free-form small object (e.g. {"bp": "120/80", "pulse": 72})
    #[schema(value_type = Object)]
    pub vitals: Option<serde_json::Value>,
    #[schema(value_type = Vec<Prescription>)]
    pub prescriptions: Json<Vec<Prescription>>,
    pub created_at: DateTime<Utc>,
}

pub const RECORD_COLUMNS: &str =
    "id, patient_id, hospital_id, diagnosis, notes, vitals, prescriptions, created_at";
