use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;

use crate::{handlers, middleware, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    // CORS restricted to the configured origins
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);

    // Auth routes
    let auth_routes = Router::new()
        .route("/patients/register", post(handlers::auth_handler::register_patient))
        .route("/patients/login", post(handlers::auth_handler::login_patient))
        .route("/hospitals/register", post(handlers::auth_handler::register_hospital))
        .route("/hospitals/login", post(handlers::auth_handler::login_hospital))
        .route("/me", get(handlers::auth_handler::get_me));

    // Patient routes (by-card lookup is hospital-authenticated)
    let patient_routes = Router::new()
        .route("/me", get(handlers::patients_handler::get_profile))
        .route("/me", put(handlers::patients_handler::update_profile))
        .route("/me/dashboard", get(handlers::patients_handler::get_dashboard))
        .route("/by-card/{id_card}", get(handlers::hospitals_handler::lookup_patient_by_card));

    // Hospital routes
    let hospital_routes = Router::new()
        .route("/", get(handlers::hospitals_handler::list_hospitals))
        .route("/me", get(handlers::hospitals_handler::get_profile))
        .route("/me", put(handlers::hospitals_handler::update_profile))
        .route("/me/stats", get(handlers::hospitals_handler::get_stats))
        .route("/me/staff", get(handlers::hospitals_handler::get_staff))
        .route("/me/staff", post(handlers::hospitals_handler::create_staff))
        .route("/me/staff/{id}", put(handlers::hospitals_handler::update_staff))
        .route("/me/staff/{id}", delete(handlers::hospitals_handler::delete_staff))
        .route("/me/patients", get(handlers::hospitals_handler::get_patients_seen));

    // Appointment routes
    let appointment_routes = Router::new()
        .route("/", post(handlers::appointments_handler::book_appointment))
        .route("/", get(handlers::appointments_handler::get_appointments))
        .route("/hospital", post(handlers::appointments_handler::hospital_book_appointment))
        .route("/{id}/status", put(handlers::appointments_handler::update_status));

    // Medical record routes
    let record_routes = Router::new()
        .route("/", post(handlers::records_handler::create_record))
        .route("/mine", get(handlers::records_handler::get_patient_records))
        .route("/hospital", get(handlers::records_handler::get_hospital_records))
        .route("/by-card/{id_card}", get(handlers::records_handler::get_records_by_card))
        .route("/{id}", put(handlers::records_handler::update_record));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics::metrics_handler).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::require_debug_key,
            )),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/patients", patient_routes)
        .nest("/api/hospitals", hospital_routes)
        .nest("/api/appointments", appointment_routes)
        .nest("/api/records", record_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CareLink API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
