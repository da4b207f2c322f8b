use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareLink API",
        version = "1.0.0",
        description = "Backend API for hospital and patient record management",
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Auth
        crate::handlers::auth_handler::register_patient,
        crate::handlers::auth_handler::login_patient,
        crate::handlers::auth_handler::register_hospital,
        crate::handlers::auth_handler::login_hospital,
        crate::handlers::auth_handler::get_me,

        // Patients
        crate::handlers::patients_handler::get_profile,
        crate::handlers::patients_handler::update_profile,
        crate::handlers::patients_handler::get_dashboard,

        // Hospitals
        crate::handlers::hospitals_handler::list_hospitals,
        crate::handlers::hospitals_handler::get_profile,
        crate::handlers::hospitals_handler::update_profile,
        crate::handlers::hospitals_handler::get_stats,
        crate::handlers::hospitals_handler::get_staff,
        crate::handlers::hospitals_handler::create_staff,
        crate::handlers::hospitals_handler::update_staff,
        crate::handlers::hospitals_handler::delete_staff,
        crate::handlers::hospitals_handler::get_patients_seen,
        crate::handlers::hospitals_handler::lookup_patient_by_card,

        // Appointments
        crate::handlers::appointments_handler::book_appointment,
        crate::handlers::appointments_handler::hospital_book_appointment,
        crate::handlers::appointments_handler::get_appointments,
        crate::handlers::appointments_handler::update_status,

        // Medical records
        crate::handlers::records_handler::create_record,
        crate::handlers::records_handler::get_records_by_card,
        crate::handlers::records_handler::get_patient_records,
        crate::handlers::records_handler::get_hospital_records,
        crate::handlers::records_handler::update_record,
    ),
    components(
        schemas(
            // Core models
            crate::models::Patient,
            crate::models::PatientSummary,
            crate::models::PatientDashboard,
            crate::models::Hospital,
            crate::models::HospitalSummary,
            crate::models::HospitalStats,
            crate::models::Staff,
            crate::models::StaffRole,
            crate::models::Appointment,
            crate::models::AppointmentStatus,
            crate::models::BookedBy,
            crate::models::MedicalRecord,
            crate::models::Prescription,

            // Input models
            crate::models::LoginInput,
            crate::models::AuthResponse,
            crate::models::RegisterPatientInput,
            crate::models::UpdatePatientInput,
            crate::models::RegisterHospitalInput,
            crate::models::UpdateHospitalInput,
            crate::models::CreateStaffInput,
            crate::models::UpdateStaffInput,
            crate::models::StaffMutationResponse,
            crate::models::BookAppointmentInput,
            crate::models::HospitalBookAppointmentInput,
            crate::models::UpdateAppointmentStatusInput,
            crate::models::CreateRecordInput,
            crate::models::UpdateRecordInput,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Registration and login"),
        (name = "patients", description = "Patient profile and dashboard"),
        (name = "hospitals", description = "Hospital profile, stats and patient lookup"),
        (name = "staff", description = "Hospital staff roster"),
        (name = "appointments", description = "Appointment booking and lifecycle"),
        (name = "records", description = "Medical record history"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
