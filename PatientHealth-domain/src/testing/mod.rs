// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use chrono::NaiveDate;
use rust_decimal::Decimal;

// Re-export useful test mocks from the data layer and the alert service
pub use patient_health_data::repository::MockPatientInfoRepositoryTrait;
pub use crate::services::alert::MockSendAlertServiceTrait;

use patient_health_data::models::{BloodPressure, HealthInfo, PatientInfo};

/// Build a patient record with the given baseline
pub fn patient_with_baseline(id: &str, temperature: Decimal, high: i32, low: i32) -> PatientInfo {
    PatientInfo {
        id: id.to_string(),
        name: "Anna".to_string(),
        surname: "Ivanova".to_string(),
        birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap_or_default(),
        health_info: HealthInfo::new(temperature, BloodPressure::new(high, low)),
    }
}
