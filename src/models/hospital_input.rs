use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterHospitalInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub registration_no: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub departments: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateHospitalInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub departments: Option<Vec<String>>,
}
