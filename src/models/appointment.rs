use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Appointment lifecycle. Stored as lowercase TEXT; the enum owns the
/// transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// pending -> {confirmed, cancelled}; confirmed -> {completed, cancelled};
    /// cancelled and completed are terminal.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(format!("Unknown appointment status: {}", other)),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who created the appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookedBy {
    Patient,
    Hospital,
}

impl BookedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookedBy::Patient => "patient",
            BookedBy::Hospital => "hospital",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub hospital_id: Uuid,
    pub date: NaiveDate,
    /// "HH:MM", rendered from the TIME column
    pub time: String,
    pub specialty: String,
    pub doctor_name: String,
    pub symptoms: Option<String>,
    pub status: String,
    pub booked_by: String,
    pub created_at: DateTime<Utc>,
}

/// SELECT list matching [`Appointment`]; TIME is rendered as "HH:MM".
pub const APPOINTMENT_COLUMNS: &str = r#"
    id,
    patient_id,
    hospital_id,
    date,
    to_char(time, 'HH24:MI') AS time,
    specialty,
    doctor_name,
    symptoms,
    status,
    booked_by,
    created_at
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_be_confirmed_or_cancelled() {
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Confirmed));
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Cancelled));
        assert!(!AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Completed));
    }

    #[test]
    fn test_confirmed_can_be_completed_or_cancelled() {
        assert!(AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Completed));
        assert!(AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Cancelled));
        assert!(!AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Pending));
    }

    #[test]
    fn test_terminal_states_allow_nothing() {
        for next in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
        ] {
            assert!(!AppointmentStatus::Cancelled.can_transition_to(next));
            assert!(!AppointmentStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), status);
        }
        assert!("archived".parse::<AppointmentStatus>().is_err());
    }
}
