//! Scenario files: patients to register and the observations to check for them

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use patient_health_data::models::{BloodPressure, CreatePatientRequest, HealthInfo};

/// A patient to register together with the readings observed for them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioPatient {
    /// Record to add to the store
    pub patient: CreatePatientRequest,

    /// Observed temperature to check, if any
    #[serde(default)]
    pub temperature: Option<Decimal>,

    /// Observed blood pressure to check, if any
    #[serde(default)]
    pub blood_pressure: Option<BloodPressure>,
}

/// A full run of the checker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Scenario {
    pub patients: Vec<ScenarioPatient>,
}

impl Scenario {
    /// Parse a scenario from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid scenario JSON")
    }

    /// Read and parse a scenario file
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Two patients, one with an abnormal pressure reading and one with a fever
    pub fn demo() -> Self {
        let ivan = CreatePatientRequest {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            birthday: NaiveDate::from_ymd_opt(1980, 11, 26).unwrap_or_default(),
            health_info: HealthInfo::new(Decimal::new(3665, 2), BloodPressure::new(120, 80)),
        };
        let semen = CreatePatientRequest {
            name: "Semen".to_string(),
            surname: "Mikhailov".to_string(),
            birthday: NaiveDate::from_ymd_opt(1982, 1, 16).unwrap_or_default(),
            health_info: HealthInfo::new(Decimal::new(366, 1), BloodPressure::new(125, 78)),
        };

        Self {
            patients: vec![
                ScenarioPatient {
                    patient: ivan,
                    temperature: Some(Decimal::new(368, 1)),
                    blood_pressure: Some(BloodPressure::new(60, 120)),
                },
                ScenarioPatient {
                    patient: semen,
                    temperature: Some(Decimal::new(385, 1)),
                    blood_pressure: Some(BloodPressure::new(125, 78)),
                },
            ],
        }
    }

    /// Total number of checks the scenario will run
    pub fn check_count(&self) -> usize {
        self.patients
            .iter()
            .map(|p| usize::from(p.temperature.is_some()) + usize::from(p.blood_pressure.is_some()))
            .sum()
    }
}
