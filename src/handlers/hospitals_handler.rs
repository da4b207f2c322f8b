use axum::{
    extract::{Path, State},
    Json,
};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    extractors::AuthHospital,
    models::{
        hospital::{Hospital, HospitalStats, HospitalSummary, HOSPITAL_COLUMNS},
        patient::{Patient, PatientSummary, PATIENT_COLUMNS},
        staff::{Staff, StaffRole, STAFF_COLUMNS},
        CreateStaffInput, StaffMutationResponse, UpdateHospitalInput, UpdateStaffInput,
    },
    AppError, AppResult, AppState,
};

// Public hospital directory with 60-second TTL
static DIRECTORY_CACHE: Lazy<Cache<&'static str, Vec<HospitalSummary>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .build()
});

async fn invalidate_directory_cache() {
    DIRECTORY_CACHE.invalidate(&"all").await;
}

/// GET /api/hospitals - Public directory patients book against
#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "Hospital directory", body = Vec<HospitalSummary>)
    ),
    tag = "hospitals"
)]
pub async fn list_hospitals(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<HospitalSummary>>> {
    if let Some(cached) = DIRECTORY_CACHE.get(&"all").await {
        return Ok(Json(cached));
    }

    let hospitals = sqlx::query_as::<_, HospitalSummary>(
        "SELECT id, name, departments, address FROM hospitals ORDER BY name",
    )
    .fetch_all(&state.db)
    .await?;

    DIRECTORY_CACHE.insert("all", hospitals.clone()).await;
    Ok(Json(hospitals))
}

/// GET /api/hospitals/me
#[utoipa::path(
    get,
    path = "/api/hospitals/me",
    responses(
        (status = 200, description = "Own hospital profile", body = Hospital),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
) -> AppResult<Json<Hospital>> {
    let sql = format!("SELECT {} FROM hospitals WHERE id = $1", HOSPITAL_COLUMNS);
    let hospital = sqlx::query_as::<_, Hospital>(&sql)
        .bind(auth.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(hospital))
}

/// PUT /api/hospitals/me - Partial profile update (registration_no is not updatable)
#[utoipa::path(
    put,
    path = "/api/hospitals/me",
    request_body = UpdateHospitalInput,
    responses(
        (status = 200, description = "Profile updated", body = Hospital),
        (status = 400, description = "No fields to update"),
        (status = 409, description = "Email already in use")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Json(input): Json<UpdateHospitalInput>,
) -> AppResult<Json<Hospital>> {
    // Build dynamic UPDATE query
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.name.is_some() {
        updates.push(format!("name = ${}", bind_count));
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
    if input.address.is_some() {
        updates.push(format!("address = ${}", bind_count));
        bind_count += 1;
    }
    if input.departments.is_some() {
        updates.push(format!("departments = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        "UPDATE hospitals SET {} WHERE id = ${} RETURNING {}",
        updates.join(", "),
        bind_count,
        HOSPITAL_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Hospital>(&sql);

    if let Some(name) = &input.name {
        query = query.bind(name);
    }
    if let Some(email) = &input.email {
        query = query.bind(email);
    }
    if let Some(phone) = &input.phone {
        query = query.bind(phone);
    }
    if let Some(address) = &input.address {
        query = query.bind(address);
    }
    if let Some(departments) = &input.departments {
        query = query.bind(departments);
    }

    query = query.bind(auth.id);

    let hospital = query
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    invalidate_directory_cache().await;
    Ok(Json(hospital))
}

/// GET /api/hospitals/me/stats
#[utoipa::path(
    get,
    path = "/api/hospitals/me/stats",
    responses(
        (status = 200, description = "Hospital counters", body = HospitalStats),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
) -> AppResult<Json<HospitalStats>> {
    let db = &state.db;

    // Run all counts in parallel
    let (staff, patients_seen, pending, confirmed, completed, cancelled, records) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM staff WHERE hospital_id = $1"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)::int8 FROM (
                SELECT patient_id FROM appointments WHERE hospital_id = $1
                UNION
                SELECT patient_id FROM medical_records WHERE hospital_id = $1
            ) AS seen
            "#
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE hospital_id = $1 AND status = 'pending'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE hospital_id = $1 AND status = 'confirmed'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE hospital_id = $1 AND status = 'completed'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM appointments WHERE hospital_id = $1 AND status = 'cancelled'"
        )
        .bind(auth.id)
        .fetch_one(db),
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::int8 FROM medical_records WHERE hospital_id = $1"
        )
        .bind(auth.id)
        .fetch_one(db),
    )?;

    Ok(Json(HospitalStats {
        staff,
        patients_seen,
        pending_appointments: pending,
        confirmed_appointments: confirmed,
        completed_appointments: completed,
        cancelled_appointments: cancelled,
        medical_records: records,
    }))
}

/// GET /api/hospitals/me/staff
#[utoipa::path(
    get,
    path = "/api/hospitals/me/staff",
    responses(
        (status = 200, description = "Staff roster", body = Vec<Staff>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "staff",
    security(("bearer_auth" = []))
)]
pub async fn get_staff(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
) -> AppResult<Json<Vec<Staff>>> {
    let sql = format!(
        "SELECT {} FROM staff WHERE hospital_id = $1 ORDER BY full_name",
        STAFF_COLUMNS
    );
    let staff = sqlx::query_as::<_, Staff>(&sql)
        .bind(auth.id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(staff))
}

/// POST /api/hospitals/me/staff
#[utoipa::path(
    post,
    path = "/api/hospitals/me/staff",
    request_body = CreateStaffInput,
    responses(
        (status = 200, description = "Staff member added", body = Staff),
        (status = 400, description = "Missing required fields"),
        (status = 422, description = "Unknown staff role")
    ),
    tag = "staff",
    security(("bearer_auth" = []))
)]
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Json(input): Json<CreateStaffInput>,
) -> AppResult<Json<Staff>> {
    if input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full_name is required".to_string()));
    }

    let role: StaffRole = input
        .role
        .parse()
        .map_err(|e: String| AppError::Validation(e))?;

    let sql = format!(
        r#"
        INSERT INTO staff (hospital_id, full_name, role, specialization, email, phone)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        STAFF_COLUMNS
    );
    let staff = sqlx::query_as::<_, Staff>(&sql)
        .bind(auth.id)
        .bind(&input.full_name)
        .bind(role.as_str())
        .bind(&input.specialization)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(staff))
}

/// PUT /api/hospitals/me/staff/{id}
#[utoipa::path(
    put,
    path = "/api/hospitals/me/staff/{id}",
    params(
        ("id" = Uuid, Path, description = "Staff ID")
    ),
    request_body = UpdateStaffInput,
    responses(
        (status = 200, description = "Staff member updated", body = Staff),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Staff member not found in this hospital"),
        (status = 422, description = "Unknown staff role")
    ),
    tag = "staff",
    security(("bearer_auth" = []))
)]
pub async fn update_staff(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Path(staff_id): Path<Uuid>,
    Json(input): Json<UpdateStaffInput>,
) -> AppResult<Json<Staff>> {
    // Validate the role before touching the database
    let role = match &input.role {
        Some(raw) => Some(
            raw.parse::<StaffRole>()
                .map_err(|e: String| AppError::Validation(e))?,
        ),
        None => None,
    };

    let mut updates = vec![];
    let mut bind_count = 1;

    if input.full_name.is_some() {
        updates.push(format!("full_name = ${}", bind_count));
        bind_count += 1;
    }
    if role.is_some() {
        updates.push(format!("role = ${}", bind_count));
        bind_count += 1;
    }
    if input.specialization.is_some() {
        updates.push(format!("specialization = ${}", bind_count));
        bind_count += 1;
    }
    if input.email.is_some() {
        updates.push(format!("email = ${}", bind_count));
        bind_count += 1;
    }
    if input.phone.is_some() {
        updates.push(format!("phone = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    // Scoped to the owning hospital; someone else's staff row reads as 404
    let sql = format!(
        "UPDATE staff SET {} WHERE id = ${} AND hospital_id = ${} RETURNING {}",
        updates.join(", "),
        bind_count,
        bind_count + 1,
        STAFF_COLUMNS
    );

    let mut query = sqlx::query_as::<_, Staff>(&sql);

    if let Some(full_name) = &input.full_name {
        query = query.bind(full_name);
    }
    if let Some(role) = role {
        query = query.bind(role.as_str());
    }
    if let Some(specialization) = &input.specialization {
        query = query.bind(specialization);
    }
    if let Some(email) = &input.email {
        query = query.bind(email);
    }
    if let Some(phone) = &input.phone {
        query = query.bind(phone);
    }

    query = query.bind(staff_id).bind(auth.id);

    let staff = query
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff member {} not found", staff_id)))?;

    Ok(Json(staff))
}

/// DELETE /api/hospitals/me/staff/{id}
#[utoipa::path(
    delete,
    path = "/api/hospitals/me/staff/{id}",
    params(
        ("id" = Uuid, Path, description = "Staff ID")
    ),
    responses(
        (status = 200, description = "Staff member removed", body = StaffMutationResponse),
        (status = 404, description = "Staff member not found in this hospital")
    ),
    tag = "staff",
    security(("bearer_auth" = []))
)]
pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Path(staff_id): Path<Uuid>,
) -> AppResult<Json<StaffMutationResponse>> {
    let result = sqlx::query("DELETE FROM staff WHERE id = $1 AND hospital_id = $2")
        .bind(staff_id)
        .bind(auth.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Staff member {} not found",
            staff_id
        )));
    }

    Ok(Json(StaffMutationResponse {
        success: true,
        staff_id: Some(staff_id),
        message: Some("Staff member removed".to_string()),
    }))
}

/// GET /api/hospitals/me/patients - Distinct patients this hospital has seen
#[utoipa::path(
    get,
    path = "/api/hospitals/me/patients",
    responses(
        (status = 200, description = "Patients seen by this hospital", body = Vec<PatientSummary>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn get_patients_seen(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
) -> AppResult<Json<Vec<PatientSummary>>> {
    let patients = sqlx::query_as::<_, PatientSummary>(
        r#"
        SELECT id, full_name, email, id_card, phone, gender, date_of_birth
        FROM patients
        WHERE id IN (
            SELECT patient_id FROM appointments WHERE hospital_id = $1
            UNION
            SELECT patient_id FROM medical_records WHERE hospital_id = $1
        )
        ORDER BY full_name
        "#,
    )
    .bind(auth.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(patients))
}

/// GET /api/patients/by-card/{id_card} - Hospital-side patient lookup
#[utoipa::path(
    get,
    path = "/api/patients/by-card/{id_card}",
    params(
        ("id_card" = String, Path, description = "Patient national ID")
    ),
    responses(
        (status = 200, description = "Patient profile", body = Patient),
        (status = 404, description = "No patient with that IdCard")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn lookup_patient_by_card(
    State(state): State<Arc<AppState>>,
    _auth: AuthHospital,
    Path(id_card): Path<String>,
) -> AppResult<Json<Patient>> {
    let sql = format!("SELECT {} FROM patients WHERE id_card = $1", PATIENT_COLUMNS);
    let patient = sqlx::query_as::<_, Patient>(&sql)
        .bind(&id_card)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No patient with IdCard {}", id_card)))?;

    Ok(Json(patient))
}
