use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    extractors::AuthPatient,
    models::{
        patient::{Patient, PatientDashboard, PATIENT_COLUMNS},
        UpdatePatientInput,
    },
    AppError, AppResult, AppState,
};

/// GET /api/patients/me
#[utoipa::path(
    get,
    path = "/api/patients/me",
    responses(
        (status = 200, description = "Own patient profile", body = Patient),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthPatient,
) -> AppResult<Json<Patient>> {
    let sql = format!("SELECT {} FROM patients WHERE id = $1", PATIENT_COLUMNS);
    let patient = sqlx::query_as::<_, Patient>(&sql)
        .bind(auth.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(patient))
}

/// PUT /api/patients/me - Partial profile update (id_card is not updatable)
#[utoipa::path(
    put,
    path = "/api/patients/me",
    request_body = UpdatePatientInput,
    responses(
        (status = 200, description = "Profile updated", body = Patient),
        (status = 400, description = "No fields to update"),
        (status = 409, description = "Email already in use")
    ),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthPatient,
    Json(input): Json<UpdatePatientInput>,
) -> AppResult<Json<Patient>> {
    // Build dynamic UPDATE query
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.full_name.is_some() {
        updates.push(format!("full_name = ${}", bind_count));
        bind_count += 1;
    }
    if input.email.is_some() {
        updates.push(format!("email = LOWER(${})", bind_count));
        bind_count += 1;
    }
    if input.phone.is_some() {
        updates.push(format!("phone = ${}", bind_count));
        bind_count += 1;
    }
    if input.gender.is_some() {
        updates.push(format!("gender = ${}", bind_count));
        bind_count += 1;
    }
    if input.date_of_birth.is_some() {
        updates.push(format!("date_of_birth = ${}", bind_count));
        bind_count += 1;
    }
    if input.address.is_some() {
        updates.push(format!("address = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        "UPDATE patients SET {} WHERE id = ${} RETURNING {}",
        updates.join(", "),
        bind_count,
        PATIENT_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Patient>(&sql);

    if let Some(full_name) = &input.full_name {
        query = query.bind(full_name);
    }
    if let Some(email) = &input.email {
        query = query.bind(email);
    }
    if let Some(phone) = &input.phone {
        query = query.bind(phone);
    }
    if let Some(gender) = &input.gender {
        query = query.bind(gender);
    }
    if let Some(date_of_birth) = input.date_of_birth {
        query = query.bind(date_of_birth);
    }
    if let Some(address) = &input.address {
        query = query.bind(address);
    }

    query = query.bind(auth.id);

    let patient = query
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(patient))
}

/// GET /api/patients/me/dashboard - Appointment and record counters
#[utoipa::path(
    get,
    path = "/api/patients/me/dashboard",
    responses(
        (status = 200, description = "Dashboard counters", body = PatientDashboard),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "patients",
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    auth: AuthPatient,
) -> AppResult<Json<PatientDashboard>> {
    let db = &state.db;

    // Run all counts in parallel
    let (pending, confirmed, completed, cancelled, records) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE patient_id = $1 AND status = 'pending'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE patient_id = $1 AND status = 'confirmed'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE patient_id = $1 AND status = 'completed'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE patient_id = $1 AND status = 'cancelled'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM medical_records WHERE patient_id = $1"
        )
        .bind(auth.id)
        .fetch_one(db),
    )?;

    Ok(Json(PatientDashboard {
        total_appointments: pending + confirmed + completed + cancelled,
        pending_appointments: pending,
        confirmed_appointments: confirmed,
        completed_appointments: completed,
        cancelled_appointments: cancelled,
        medical_records: records,
    }))
}
