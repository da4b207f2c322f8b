use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{self, PrincipalRole};
use crate::AppState;

type AuthRejection = (StatusCode, axum::Json<serde_json::Value>);

fn extract_bearer_token(parts: &Parts) -> Option<String> {
    let auth_header = parts.headers.get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(|t| t.to_string())
}

fn unauthorized(msg: &str) -> AuthRejection {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": msg })),
    )
}

fn forbidden(msg: &str) -> AuthRejection {
    (StatusCode::FORBIDDEN, axum::Json(json!({ "error": msg })))
}

/// Any authenticated account, patient or hospital. Token claims only; the
/// typed extractors below also verify the row still exists.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub id: Uuid,
    pub role: PrincipalRole,
}

async fn resolve_principal(
    token: Option<String>,
    state: &AppState,
) -> Result<AuthPrincipal, AuthRejection> {
    let token = token.ok_or_else(|| unauthorized("Missing Authorization bearer token"))?;

    let claims = auth::validate_token(&token, &state.config.jwt_secret)
        .map_err(|e| unauthorized(&e.to_string()))?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| unauthorized("Invalid subject in token"))?;

    Ok(AuthPrincipal {
        id,
        role: claims.role,
    })
}

impl FromRequestParts<Arc<AppState>> for AuthPrincipal {
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_bearer_token(parts);
        let state = state.clone();

        async move { resolve_principal(token, &state).await }
    }
}

/// An authenticated patient, verified against the patients table.
#[derive(Debug, Clone)]
pub struct AuthPatient {
    pub id: Uuid,
}

impl FromRequestParts<Arc<AppState>> for AuthPatient {
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_bearer_token(parts);
        let state = state.clone();

        async move {
            let principal = resolve_principal(token, &state).await?;

            if principal.role != PrincipalRole::Patient {
                return Err(forbidden("Patient account required"));
            }

            let exists: Option<i32> =
                sqlx::query_scalar("SELECT 1 FROM patients WHERE id = $1")
                    .bind(principal.id)
                    .fetch_optional(&state.db)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, patient_id = %principal.id, "Patient lookup failed");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            axum::Json(json!({"error": "Database error"})),
                        )
                    })?;

            if exists.is_none() {
                return Err(unauthorized("Patient account no longer exists"));
            }

            Ok(AuthPatient { id: principal.id })
        }
    }
}

/// An authenticated hospital, verified against the hospitals table.
#[derive(Debug, Clone)]
pub struct AuthHospital {
    pub id: Uuid,
}

impl FromRequestParts<Arc<AppState>> for AuthHospital {
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_bearer_token(parts);
        let state = state.clone();

        async move {
            let principal = resolve_principal(token, &state).await?;

            if principal.role != PrincipalRole::Hospital {
                return Err(forbidden("Hospital account required"));
            }

            let exists: Option<i32> =
                sqlx::query_scalar("SELECT 1 FROM hospitals WHERE id = $1")
                    .bind(principal.id)
                    .fetch_optional(&state.db)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, hospital_id = %principal.id, "Hospital lookup failed");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            axum::Json(json!({"error": "Database error"})),
                        )
                    })?;

            if exists.is_none() {
                return Err(unauthorized("Hospital account no longer exists"));
            }

            Ok(AuthHospital { id: principal.id })
        }
    }
}
