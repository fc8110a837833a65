pub mod alert;
pub mod medical;

// Domain services
// This module contains the health checks and the alert notifiers they report to.

// Re-export service traits and implementations
pub use alert::{
    AlertError, ConsoleAlertService, LoggingAlertService, RecordingAlertService,
    SendAlertServiceTrait,
};
pub use medical::{
    alert_message, MedicalService, MedicalServiceError, MedicalServiceTrait,
    TEMPERATURE_DEVIATION_THRESHOLD,
};
