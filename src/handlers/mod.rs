pub mod appointments_handler;
pub mod auth_handler;
pub mod health;
pub mod hospitals_handler;
pub mod metrics;
pub mod patients_handler;
pub mod records_handler;

pub use health::health_check;
pub use metrics::{setup_metrics_recorder, MetricsState};
