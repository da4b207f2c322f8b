pub mod appointment;
pub mod appointment_input;
pub mod auth_input;
pub mod hospital;
pub mod hospital_input;
pub mod medical_record;
pub mod patient;
pub mod patient_input;
pub mod record_input;
pub mod staff;
pub mod staff_input;

pub use appointment::{Appointment, AppointmentStatus, BookedBy};
pub use appointment_input::{
    BookAppointmentInput, HospitalBookAppointmentInput, UpdateAppointmentStatusInput,
};
pub use auth_input::{AuthResponse, LoginInput};
pub use hospital::{Hospital, HospitalStats, HospitalSummary};
pub use hospital_input::{RegisterHospitalInput, UpdateHospitalInput};
pub use medical_record::{MedicalRecord, Prescription};
pub use patient::{Patient, PatientDashboard, PatientSummary};
pub use patient_input::{RegisterPatientInput, UpdatePatientInput};
pub use record_input::{CreateRecordInput, UpdateRecordInput};
pub use staff::{Staff, StaffRole};
pub use staff_input::{CreateStaffInput, StaffMutationResponse, UpdateStaffInput};
