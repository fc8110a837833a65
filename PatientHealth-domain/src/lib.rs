// PatientHealth Domain
// This crate contains the health check logic for the PatientHealth application

// Services that implement business logic
pub mod services;

// Re-export the data layer for convenience
pub use patient_health_data::{models, repository};

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
