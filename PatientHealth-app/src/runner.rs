//! Runs a scenario through the medical service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use patient_health_data::repository::{InMemoryPatientRepository, PatientInfoRepositoryTrait};
use patient_health_domain::services::{
    AlertError, MedicalService, MedicalServiceTrait, SendAlertServiceTrait,
};

use crate::scenario::Scenario;

/// Notifier wrapper counting successfully delivered alerts
#[derive(Debug)]
pub struct CountingAlertService<A> {
    inner: A,
    sent: AtomicUsize,
}

impl<A> CountingAlertService<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            sent: AtomicUsize::new(0),
        }
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<A: SendAlertServiceTrait> SendAlertServiceTrait for CountingAlertService<A> {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        self.inner.send(message).await?;
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Outcome of a scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScenarioReport {
    /// Patients registered in the store
    pub patients: usize,
    /// Checks that completed
    pub checks: usize,
    /// Alerts delivered
    pub alerts: usize,
    /// Checks that returned an error
    pub failures: usize,
}

/// Register every scenario patient in a fresh in-memory store and run the
/// observed readings through the medical service.
///
/// A failing check is logged and counted; the run carries on with the next one.
pub async fn run_scenario<A>(scenario: &Scenario, alerts: A) -> anyhow::Result<ScenarioReport>
where
    A: SendAlertServiceTrait + 'static,
{
    let repository = InMemoryPatientRepository::new();
    let alerts = Arc::new(CountingAlertService::new(alerts));
    let service = MedicalService::new(repository.clone(), alerts.clone());

    let mut report = ScenarioReport::default();
    info!(
        "Running {} check(s) for {} patient(s)",
        scenario.check_count(),
        scenario.patients.len()
    );

    for entry in &scenario.patients {
        let id = repository.add(entry.patient.clone()).await?;
        report.patients += 1;
        info!(
            "Registered patient {} {} as {}",
            entry.patient.name, entry.patient.surname, id
        );

        if let Some(pressure) = entry.blood_pressure {
            match service.check_blood_pressure(&id, pressure).await {
                Ok(()) => report.checks += 1,
                Err(e) => {
                    error!("Blood pressure check failed for {}: {}", id, e);
                    report.failures += 1;
                }
            }
        }

        if let Some(temperature) = entry.temperature {
            match service.check_temperature(&id, temperature).await {
                Ok(()) => report.checks += 1,
                Err(e) => {
                    error!("Temperature check failed for {}: {}", id, e);
                    report.failures += 1;
                }
            }
        }
    }

    report.alerts = alerts.sent();
    Ok(report)
}
