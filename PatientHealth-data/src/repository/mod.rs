// Repository module structure
pub mod errors;
mod in_memory;
mod patient;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use patient::{InMemoryPatientRepository, PatientInfoRepositoryTrait};

// Re-export the generated mock for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use patient::MockPatientInfoRepositoryTrait;
