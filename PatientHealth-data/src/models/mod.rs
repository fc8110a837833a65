pub mod patient;

pub use patient::{BloodPressure, CreatePatientRequest, HealthInfo, PatientInfo};
