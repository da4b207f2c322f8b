use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::types::Json as SqlJson;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    extractors::{AuthHospital, AuthPatient},
    models::{
        medical_record::{MedicalRecord, RECORD_COLUMNS},
        CreateRecordInput, UpdateRecordInput,
    },
    AppError, AppResult, AppState,
};

async fn patient_id_by_card(db: &sqlx::PgPool, id_card: &str) -> AppResult<Uuid> {
    let patient_id: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM patients WHERE id_card = $1")
            .bind(id_card)
            .fetch_optional(db)
            .await?;

    patient_id.ok_or_else(|| AppError::NotFound(format!("No patient with IdCard {}", id_card)))
}

/// POST /api/records - Hospital writes a record for a patient found by IdCard
#[utoipa::path(
    post,
    path = "/api/records",
    request_body = CreateRecordInput,
    responses(
        (status = 200, description = "Record created", body = MedicalRecord),
        (status = 400, description = "Missing diagnosis"),
        (status = 404, description = "No patient with that IdCard")
    ),
    tag = "records",
    security(("bearer_auth" = []))
)]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Json(input): Json<CreateRecordInput>,
) -> AppResult<Json<MedicalRecord>> {
    if input.diagnosis.trim().is_empty() {
        return Err(AppError::BadRequest("diagnosis is required".to_string()));
    }

    let patient_id = patient_id_by_card(&state.db, &input.id_card).await?;

    let sql = format!(
        r#"
        INSERT INTO medical_records (patient_id, hospital_id, diagnosis, notes, vitals, prescriptions)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        RECORD_COLUMNS
    );
    let record = sqlx::query_as::<_, MedicalRecord>(&sql)
        .bind(patient_id)
        .bind(auth.id)
        .bind(&input.diagnosis)
        .bind(&input.notes)
        .bind(&input.vitals)
        .bind(SqlJson(&input.prescriptions))
        .fetch_one(&state.db)
        .await?;

    tracing::info!(record_id = %record.id, patient_id = %patient_id, hospital_id = %auth.id, "Medical record created");
    Ok(Json(record))
}

/// GET /api/records/by-card/{id_card} - All records for a patient across every
/// hospital, newest first
#[utoipa::path(
    get,
    path = "/api/records/by-card/{id_card}",
    params(
        ("id_card" = String, Path, description = "Patient national ID")
    ),
    responses(
        (status = 200, description = "Records across all hospitals, newest first", body = Vec<MedicalRecord>),
        (status = 404, description = "No patient with that IdCard")
    ),
    tag = "records",
    security(("bearer_auth" = []))
)]
pub async fn get_records_by_card(
    State(state): State<Arc<AppState>>,
    _auth: AuthHospital,
    Path(id_card): Path<String>,
) -> AppResult<Json<Vec<MedicalRecord>>> {
    let patient_id = patient_id_by_card(&state.db, &id_card).await?;

    let sql = format!(
        "SELECT {} FROM medical_records WHERE patient_id = $1 ORDER BY created_at DESC",
        RECORD_COLUMNS
    );
    let records = sqlx::query_as::<_, MedicalRecord>(&sql)
        .bind(patient_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(records))
}

/// GET /api/records/mine - Patient's own history
#[utoipa::path(
    get,
    path = "/api/records/mine",
    responses(
        (status = 200, description = "Own records, newest first", body = Vec<MedicalRecord>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "records",
    security(("bearer_auth" = []))
)]
pub async fn get_patient_records(
    State(state): State<Arc<AppState>>,
    auth: AuthPatient,
) -> AppResult<Json<Vec<MedicalRecord>>> {
    let sql = format!(
        "SELECT {} FROM medical_records WHERE patient_id = $1 ORDER BY created_at DESC",
        RECORD_COLUMNS
    );
    let records = sqlx::query_as::<_, MedicalRecord>(&sql)
        .bind(auth.id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(records))
}

/// GET /api/records/hospital - Records this hospital has authored
#[utoipa::path(
    get,
    path = "/api/records/hospital",
    responses(
        (status = 200, description = "Records authored by this hospital, newest first", body = Vec<MedicalRecord>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "records",
    security(("bearer_auth" = []))
)]
pub async fn get_hospital_records(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
) -> AppResult<Json<Vec<MedicalRecord>>> {
    let sql = format!(
        "SELECT {} FROM medical_records WHERE hospital_id = $1 ORDER BY created_at DESC",
        RECORD_COLUMNS
    );
    let records = sqlx::query_as::<_, MedicalRecord>(&sql)
        .bind(auth.id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(records))
}

/// PUT /api/records/{id} - Records are immutable history; only diagnosis and
/// notes may change, and only by the authoring hospital
#[utoipa::path(
    put,
    path = "/api/records/{id}",
    params(
        ("id" = Uuid, Path, description = "Record ID")
    ),
    request_body = UpdateRecordInput,
    responses(
        (status = 200, description = "Record updated", body = MedicalRecord),
        (status = 400, description = "No updatable fields supplied"),
        (status = 404, description = "Record not found for this hospital")
    ),
    tag = "records",
    security(("bearer_auth" = []))
)]
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Path(record_id): Path<Uuid>,
    Json(input): Json<UpdateRecordInput>,
) -> AppResult<Json<MedicalRecord>> {
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.diagnosis.is_some() {
        updates.push(format!("diagnosis = ${}", bind_count));
        bind_count += 1;
    }
    if input.notes.is_some() {
        updates.push(format!("notes = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest(
            "Only diagnosis and notes are updatable; supply at least one".to_string(),
        ));
    }

    let sql = format!(
        "UPDATE medical_records SET {} WHERE id = ${} AND hospital_id = ${} RETURNING {}",
        updates.join(", "),
        bind_count,
        bind_count + 1,
        RECORD_COLUMNS
    );

    let mut query = sqlx::query_as::<_, MedicalRecord>(&sql);

    if let Some(diagnosis) = &input.diagnosis {
        query = query.bind(diagnosis);
    }
    if let Some(notes) = &input.notes {
        query = query.bind(notes);
    }

    query = query.bind(record_id).bind(auth.id);

    let record = query
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Record {} not found", record_id)))?;

    Ok(Json(record))
}
