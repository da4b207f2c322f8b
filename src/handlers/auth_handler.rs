use axum::{extract::State, Json};
use serde_json::json;
use std::sync::Arc;

use crate::{
    auth::{self, PrincipalRole},
    extractors::AuthPrincipal,
    models::{
        hospital::{Hospital, HospitalCredentials, HOSPITAL_COLUMNS},
        patient::{Patient, PatientCredentials, PATIENT_COLUMNS},
        AuthResponse, LoginInput, RegisterHospitalInput, RegisterPatientInput,
    },
    AppError, AppResult, AppState,
};

fn require_field(value: &str, name: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", name)));
    }
    Ok(())
}

/// POST /api/auth/patients/register
#[utoipa::path(
    post,
    path = "/api/auth/patients/register",
    request_body = RegisterPatientInput,
    responses(
        (status = 200, description = "Patient registered", body = AuthResponse),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Email or IdCard already registered")
    ),
    tag = "auth"
)]
pub async fn register_patient(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterPatientInput>,
) -> AppResult<Json<AuthResponse>> {
    require_field(&input.full_name, "full_name")?;
    require_field(&input.email, "email")?;
    require_field(&input.password, "password")?;
    require_field(&input.id_card, "id_card")?;

    let password_hash = auth::hash_password(&input.password)?;

    // Unique indexes on email and id_card back this up; violations map to 409
    let sql = format!(
        r#"
        INSERT INTO patients (full_name, email, password_hash, id_card, phone, gender, date_of_birth, address)
        VALUES ($1, LOWER($2), $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        PATIENT_COLUMNS
    );
    let patient = sqlx::query_as::<_, Patient>(&sql)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.id_card)
        .bind(&input.phone)
        .bind(&input.gender)
        .bind(input.date_of_birth)
        .bind(&input.address)
        .fetch_one(&state.db)
        .await?;

    let token = auth::issue_token(patient.id, PrincipalRole::Patient, &state.config.jwt_secret)?;

    tracing::info!(patient_id = %patient.id, "Patient registered");
    Ok(Json(AuthResponse {
        token,
        role: PrincipalRole::Patient.as_str().to_string(),
        id: patient.id,
    }))
}

/// POST /api/auth/patients/login
#[utoipa::path(
    post,
    path = "/api/auth/patients/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login_patient(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    require_field(&input.email, "email")?;
    require_field(&input.password, "password")?;

    let creds = sqlx::query_as::<_, PatientCredentials>(
        "SELECT id, password_hash FROM patients WHERE email = LOWER($1)",
    )
    .bind(&input.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    auth::verify_password(&input.password, &creds.password_hash)?;

    let token = auth::issue_token(creds.id, PrincipalRole::Patient, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        token,
        role: PrincipalRole::Patient.as_str().to_string(),
        id: creds.id,
    }))
}

/// POST /api/auth/hospitals/register
#[utoipa::path(
    post,
    path = "/api/auth/hospitals/register",
    request_body = RegisterHospitalInput,
    responses(
        (status = 200, description = "Hospital registered", body = AuthResponse),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Email or registration number already registered")
    ),
    tag = "auth"
)]
pub async fn register_hospital(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterHospitalInput>,
) -> AppResult<Json<AuthResponse>> {
    require_field(&input.name, "name")?;
    require_field(&input.email, "email")?;
    require_field(&input.password, "password")?;
    require_field(&input.registration_no, "registration_no")?;

    let password_hash = auth::hash_password(&input.password)?;

    let sql = format!(
        r#"
        INSERT INTO hospitals (name, email, password_hash, registration_no, phone, address, departments)
        VALUES ($1, LOWER($2), $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        HOSPITAL_COLUMNS
    );
    let hospital = sqlx::query_as::<_, Hospital>(&sql)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.registration_no)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.departments)
        .fetch_one(&state.db)
        .await?;

    let token = auth::issue_token(hospital.id, PrincipalRole::Hospital, &state.config.jwt_secret)?;

    tracing::info!(hospital_id = %hospital.id, "Hospital registered");
    Ok(Json(AuthResponse {
        token,
        role: PrincipalRole::Hospital.as_str().to_string(),
        id: hospital.id,
    }))
}

/// POST /api/auth/hospitals/login
#[utoipa::path(
    post,
    path = "/api/auth/hospitals/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login_hospital(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<AuthResponse>> {
    require_field(&input.email, "email")?;
    require_field(&input.password, "password")?;

    let creds = sqlx::query_as::<_, HospitalCredentials>(
        "SELECT id, password_hash FROM hospitals WHERE email = LOWER($1)",
    )
    .bind(&input.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    auth::verify_password(&input.password, &creds.password_hash)?;

    let token = auth::issue_token(creds.id, PrincipalRole::Hospital, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        token,
        role: PrincipalRole::Hospital.as_str().to_string(),
        id: creds.id,
    }))
}

/// GET /api/auth/me - Profile of whoever the token identifies
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated principal's profile"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    principal: AuthPrincipal,
) -> AppResult<Json<serde_json::Value>> {
    match principal.role {
        PrincipalRole::Patient => {
            let sql = format!("SELECT {} FROM patients WHERE id = $1", PATIENT_COLUMNS);
            let patient = sqlx::query_as::<_, Patient>(&sql)
                .bind(principal.id)
                .fetch_optional(&state.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

            Ok(Json(json!({ "role": "patient", "profile": patient })))
        }
        PrincipalRole::Hospital => {
            let sql = format!("SELECT {} FROM hospitals WHERE id = $1", HOSPITAL_COLUMNS);
            let hospital = sqlx::query_as::<_, Hospital>(&sql)
                .bind(principal.id)
                .fetch_optional(&state.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

            Ok(Json(json!({ "role": "hospital", "profile": hospital })))
        }
    }
}
