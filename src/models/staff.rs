use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Roster roles. Staff rows are employee records, not login principals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Doctor,
    Nurse,
    Technician,
    Admin,
    Support,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Doctor => "doctor",
            StaffRole::Nurse => "nurse",
            StaffRole::Technician => "technician",
            StaffRole::Admin => "admin",
            StaffRole::Support => "support",
        }
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(StaffRole::Doctor),
            "nurse" => Ok(StaffRole::Nurse),
            "technician" => Ok(StaffRole::Technician),
            "admin" => Ok(StaffRole::Admin),
            "support" => Ok(StaffRole::Support),
            other => Err(format!("Unknown staff role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Staff {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub full_name: String,
    pub role: String,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const STAFF_COLUMNS: &str =
    "id, hospital_id, full_name, role, specialization, email, phone, created_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_text() {
        for role in [
            StaffRole::Doctor,
            StaffRole::Nurse,
            StaffRole::Technician,
            StaffRole::Admin,
            StaffRole::Support,
        ] {
            assert_eq!(role.as_str().parse::<StaffRole>().unwrap(), role);
        }
        assert!("janitor".parse::<StaffRole>().is_err());
    }
}
