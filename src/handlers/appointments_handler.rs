use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    auth::PrincipalRole,
    extractors::{AuthHospital, AuthPatient, AuthPrincipal},
    models::{
        appointment::{Appointment, AppointmentStatus, BookedBy, APPOINTMENT_COLUMNS},
        BookAppointmentInput, HospitalBookAppointmentInput, UpdateAppointmentStatusInput,
    },
    AppError, AppResult, AppState,
};

/// Slot times are "HH:MM" on the wire and TIME in the database.
fn parse_slot_time(raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| AppError::BadRequest(format!("Invalid time (expected HH:MM): {}", raw)))
}

/// A slot is (patient, date, time). Rejects with 409 when a non-cancelled
/// appointment already occupies it. Both booking paths go through here.
async fn ensure_slot_free(
    db: &PgPool,
    patient_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
) -> AppResult<()> {
    let taken: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT 1 FROM appointments
        WHERE patient_id = $1 AND date = $2 AND time = $3 AND status <> 'cancelled'
        "#,
    )
    .bind(patient_id)
    .bind(date)
    .bind(time)
    .fetch_optional(db)
    .await?;

    if taken.is_some() {
        return Err(AppError::Conflict(format!(
            "Patient already has an appointment on {} at {}",
            date,
            time.format("%H:%M")
        )));
    }

    Ok(())
}

async fn insert_appointment(
    db: &PgPool,
    patient_id: Uuid,
    hospital_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    specialty: &str,
    doctor_name: &str,
    symptoms: Option<&str>,
    status: AppointmentStatus,
    booked_by: BookedBy,
) -> AppResult<Appointment> {
    let sql = format!(
        r#"
        INSERT INTO appointments (patient_id, hospital_id, date, time, specialty, doctor_name, symptoms, status, booked_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    );

    let appointment = sqlx::query_as::<_, Appointment>(&sql)
        .bind(patient_id)
        .bind(hospital_id)
        .bind(date)
        .bind(time)
        .bind(specialty)
        .bind(doctor_name)
        .bind(symptoms)
        .bind(status.as_str())
        .bind(booked_by.as_str())
        .fetch_one(db)
        .await?;

    Ok(appointment)
}

/// POST /api/appointments - Patient self-booking, lands as "pending"
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = BookAppointmentInput,
    responses(
        (status = 200, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Hospital not found"),
        (status = 409, description = "Slot already booked")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    auth: AuthPatient,
    Json(input): Json<BookAppointmentInput>,
) -> AppResult<Json<Appointment>> {
    if input.specialty.trim().is_empty() {
        return Err(AppError::BadRequest("specialty is required".to_string()));
    }
    if input.doctor_name.trim().is_empty() {
        return Err(AppError::BadRequest("doctor_name is required".to_string()));
    }
    let time = parse_slot_time(&input.time)?;

    let hospital_exists: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM hospitals WHERE id = $1")
            .bind(input.hospital_id)
            .fetch_optional(&state.db)
            .await?;
    if hospital_exists.is_none() {
        return Err(AppError::NotFound(format!(
            "Hospital {} not found",
            input.hospital_id
        )));
    }

    ensure_slot_free(&state.db, auth.id, input.date, time).await?;

    let appointment = insert_appointment(
        &state.db,
        auth.id,
        input.hospital_id,
        input.date,
        time,
        &input.specialty,
        &input.doctor_name,
        input.symptoms.as_deref(),
        AppointmentStatus::Pending,
        BookedBy::Patient,
    )
    .await?;

    tracing::info!(appointment_id = %appointment.id, patient_id = %auth.id, "Appointment booked by patient");
    Ok(Json(appointment))
}

/// POST /api/appointments/hospital - Booking on a patient's behalf, lands as
/// "confirmed"; the patient is resolved by IdCard
#[utoipa::path(
    post,
    path = "/api/appointments/hospital",
    request_body = HospitalBookAppointmentInput,
    responses(
        (status = 200, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "No patient with that IdCard"),
        (status = 409, description = "Slot already booked")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn hospital_book_appointment(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Json(input): Json<HospitalBookAppointmentInput>,
) -> AppResult<Json<Appointment>> {
    if input.specialty.trim().is_empty() {
        return Err(AppError::BadRequest("specialty is required".to_string()));
    }
    if input.doctor_name.trim().is_empty() {
        return Err(AppError::BadRequest("doctor_name is required".to_string()));
    }
    let time = parse_slot_time(&input.time)?;

    let patient_id: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM patients WHERE id_card = $1")
            .bind(&input.id_card)
            .fetch_optional(&state.db)
            .await?;
    let patient_id = patient_id.ok_or_else(|| {
        AppError::NotFound(format!("No patient with IdCard {}", input.id_card))
    })?;

    ensure_slot_free(&state.db, patient_id, input.date, time).await?;

    let appointment = insert_appointment(
        &state.db,
        patient_id,
        auth.id,
        input.date,
        time,
        &input.specialty,
        &input.doctor_name,
        input.symptoms.as_deref(),
        AppointmentStatus::Confirmed,
        BookedBy::Hospital,
    )
    .await?;

    tracing::info!(appointment_id = %appointment.id, hospital_id = %auth.id, "Appointment booked by hospital");
    Ok(Json(appointment))
}

/// GET /api/appointments - The authenticated principal's appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Appointments for the authenticated principal", body = Vec<Appointment>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    principal: AuthPrincipal,
) -> AppResult<Json<Vec<Appointment>>> {
    let owner_column = match principal.role {
        PrincipalRole::Patient => "patient_id",
        PrincipalRole::Hospital => "hospital_id",
    };

    let sql = format!(
        "SELECT {} FROM appointments WHERE {} = $1 ORDER BY date, time",
        APPOINTMENT_COLUMNS, owner_column
    );
    let appointments = sqlx::query_as::<_, Appointment>(&sql)
        .bind(principal.id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(appointments))
}

/// PUT /api/appointments/{id}/status - Owning hospital moves the appointment
/// through its lifecycle
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = UpdateAppointmentStatusInput,
    responses(
        (status = 200, description = "Status updated", body = Appointment),
        (status = 404, description = "Appointment not found for this hospital"),
        (status = 409, description = "Illegal status transition"),
        (status = 422, description = "Unknown status")
    ),
    tag = "appointments",
    security(("bearer_auth" = []))
)]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    auth: AuthHospital,
    Path(appointment_id): Path<Uuid>,
    Json(input): Json<UpdateAppointmentStatusInput>,
) -> AppResult<Json<Appointment>> {
    let next: AppointmentStatus = input
        .status
        .parse()
        .map_err(|e: String| AppError::Validation(e))?;

    let sql = format!(
        "SELECT {} FROM appointments WHERE id = $1 AND hospital_id = $2",
        APPOINTMENT_COLUMNS
    );
    let appointment = sqlx::query_as::<_, Appointment>(&sql)
        .bind(appointment_id)
        .bind(auth.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Appointment {} not found", appointment_id))
        })?;

    let current: AppointmentStatus = appointment
        .status
        .parse()
        .map_err(|e: String| AppError::Internal(e))?;

    if !current.can_transition_to(next) {
        return Err(AppError::Conflict(format!(
            "Cannot move appointment from {} to {}",
            current, next
        )));
    }

    let sql = format!(
        "UPDATE appointments SET status = $1 WHERE id = $2 RETURNING {}",
        APPOINTMENT_COLUMNS
    );
    let updated = sqlx::query_as::<_, Appointment>(&sql)
        .bind(next.as_str())
        .bind(appointment_id)
        .fetch_one(&state.db)
        .await?;

    tracing::info!(
        appointment_id = %appointment_id,
        from = %current,
        to = %next,
        "Appointment status updated"
    );
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot_time_accepts_hh_mm() {
        assert_eq!(
            parse_slot_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_slot_time_rejects_bad_input() {
        assert!(parse_slot_time("25:00").is_err());
        assert!(parse_slot_time("noon").is_err());
        assert!(parse_slot_time("").is_err());
    }
}
