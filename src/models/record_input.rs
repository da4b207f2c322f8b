use serde::Deserialize;
use utoipa::ToSchema;

use super::medical_record::Prescription;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRecordInput {
    pub id_card: String,
    pub diagnosis: String,
    pub notes: Option<String>,
    #[schema(value_type = Object)]
    pub vitals: Option<serde_json::Value>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

/// Records are immutable history; only these two fields are updatable.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRecordInput {
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
}
