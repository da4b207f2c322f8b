use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Patient self-booking.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookAppointmentInput {
    pub hospital_id: Uuid,
    pub date: NaiveDate,
    /// "HH:MM"
    pub time: String,
    pub specialty: String,
    pub doctor_name: String,
    pub symptoms: Option<String>,
}

/// Hospital booking on a patient's behalf, keyed by national ID.
#[derive(Debug, Deserialize, ToSchema)]
pub struct HospitalBookAppointmentInput {
    pub id_card: String,
    pub date: NaiveDate,
    /// "HH:MM"
    pub time: String,
    pub specialty: String,
    pub doctor_name: String,
    pub symptoms: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentStatusInput {
    pub status: String,
}
