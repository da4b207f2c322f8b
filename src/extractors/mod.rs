pub mod auth;

pub use auth::{AuthHospital, AuthPatient, AuthPrincipal};
