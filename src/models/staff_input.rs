use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStaffInput {
    pub full_name: String,
    pub role: String,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStaffInput {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffMutationResponse {
    pub success: bool,
    pub staff_id: Option<Uuid>,
    pub message: Option<String>,
}
