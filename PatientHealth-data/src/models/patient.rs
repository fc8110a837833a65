use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A blood pressure measurement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BloodPressure {
    /// Systolic pressure (the higher number)
    pub high: i32,

    /// Diastolic pressure (the lower number)
    pub low: i32,
}

impl BloodPressure {
    pub fn new(high: i32, low: i32) -> Self {
        Self { high, low }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.high, self.low)
    }
}

/// Baseline health snapshot recorded for a patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthInfo {
    /// Body temperature considered normal for the patient
    pub normal_temperature: Decimal,

    /// Blood pressure considered normal for the patient
    pub blood_pressure: BloodPressure,
}

impl HealthInfo {
    pub fn new(normal_temperature: Decimal, blood_pressure: BloodPressure) -> Self {
        Self {
            normal_temperature,
            blood_pressure,
        }
    }
}

/// Storage model for a patient record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientInfo {
    /// Identifier assigned by the store
    pub id: String,

    pub name: String,

    pub surname: String,

    /// Date of birth
    pub birthday: NaiveDate,

    /// Baseline the health checks compare against
    pub health_info: HealthInfo,
}

/// Input data for adding a patient to a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePatientRequest {
    pub name: String,

    pub surname: String,

    /// Date of birth
    pub birthday: NaiveDate,

    /// Baseline the health checks compare against
    pub health_info: HealthInfo,
}

impl CreatePatientRequest {
    /// Turn the request into a stored record under the given identifier
    pub fn into_patient(self, id: impl Into<String>) -> PatientInfo {
        PatientInfo {
            id: id.into(),
            name: self.name,
            surname: self.surname,
            birthday: self.birthday,
            health_info: self.health_info,
        }
    }
}
