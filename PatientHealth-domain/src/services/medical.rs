use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error, info};

use patient_health_data::models::{BloodPressure, HealthInfo};
use patient_health_data::repository::{PatientInfoRepositoryTrait, RepositoryError};
use crate::services::alert::{AlertError, SendAlertServiceTrait};

/// Largest temperature deviation from the baseline that does not raise an alert
pub const TEMPERATURE_DEVIATION_THRESHOLD: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Medical service errors
#[derive(Debug, Error)]
pub enum MedicalServiceError {
    /// The patient is unknown to the store
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// The alert could not be delivered
    #[error(transparent)]
    Notifier(#[from] AlertError),
}

/// Message sent when a check finds a deviation for the patient
pub fn alert_message(patient_id: &str) -> String {
    format!("Warning, patient with id: {}, need help", patient_id)
}

/// Whether an observed blood pressure deviates from the baseline.
/// Any difference in either value counts.
pub fn blood_pressure_deviates(baseline: &BloodPressure, observed: &BloodPressure) -> bool {
    baseline != observed
}

/// Whether an observed temperature deviates from the baseline by more than
/// `TEMPERATURE_DEVIATION_THRESHOLD`, in either direction.
/// A difference too large to represent counts as a deviation.
pub fn temperature_deviates(baseline: Decimal, observed: Decimal) -> bool {
    baseline
        .checked_sub(observed)
        .map_or(true, |difference| difference.abs() > TEMPERATURE_DEVIATION_THRESHOLD)
}

/// Trait for medical check operations
#[async_trait]
pub trait MedicalServiceTrait {
    /// Compare an observed blood pressure with the patient's baseline,
    /// alerting when they differ
    async fn check_blood_pressure(
        &self,
        patient_id: &str,
        observed: BloodPressure,
    ) -> Result<(), MedicalServiceError>;

    /// Compare an observed temperature with the patient's baseline,
    /// alerting when it is off by more than 1.5
    async fn check_temperature(
        &self,
        patient_id: &str,
        observed: Decimal,
    ) -> Result<(), MedicalServiceError>;
}

/// Medical service comparing observations against stored baselines.
///
/// Holds only its two collaborators, so one instance can serve any number of
/// concurrent checks.
pub struct MedicalService<R, A> {
    repository: R,
    alerts: A,
}

impl<R, A> MedicalService<R, A>
where
    R: PatientInfoRepositoryTrait,
    A: SendAlertServiceTrait,
{
    /// Create a new medical service
    pub fn new(repository: R, alerts: A) -> Self {
        Self { repository, alerts }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> MedicalServiceError {
        match err {
            RepositoryError::NotFound(msg) => MedicalServiceError::NotFound(msg),
            _ => MedicalServiceError::RepositoryError(err.to_string()),
        }
    }

    async fn baseline(&self, patient_id: &str) -> Result<HealthInfo, MedicalServiceError> {
        let patient = self
            .repository
            .get_by_id(patient_id)
            .await
            .map_err(|e| {
                error!("Failed to load baseline for patient {}: {}", patient_id, e);
                self.map_repo_error(e)
            })?;

        Ok(patient.health_info)
    }

    async fn raise_alert(&self, patient_id: &str) -> Result<(), MedicalServiceError> {
        info!("Sending alert for patient {}", patient_id);
        self.alerts
            .send(&alert_message(patient_id))
            .await
            .map_err(|e| {
                error!("Failed to send alert for patient {}: {}", patient_id, e);
                MedicalServiceError::from(e)
            })
    }
}

#[async_trait]
impl<R, A> MedicalServiceTrait for MedicalService<R, A>
where
    R: PatientInfoRepositoryTrait,
    A: SendAlertServiceTrait,
{
    async fn check_blood_pressure(
        &self,
        patient_id: &str,
        observed: BloodPressure,
    ) -> Result<(), MedicalServiceError> {
        let baseline = self.baseline(patient_id).await?;

        if blood_pressure_deviates(&baseline.blood_pressure, &observed) {
            debug!(
                "Blood pressure {} differs from baseline {} for patient {}",
                observed, baseline.blood_pressure, patient_id
            );
            self.raise_alert(patient_id).await?;
        }

        Ok(())
    }

    async fn check_temperature(
        &self,
        patient_id: &str,
        observed: Decimal,
    ) -> Result<(), MedicalServiceError> {
        let baseline = self.baseline(patient_id).await?;

        if temperature_deviates(baseline.normal_temperature, observed) {
            debug!(
                "Temperature {} deviates from baseline {} for patient {}",
                observed, baseline.normal_temperature, patient_id
            );
            self.raise_alert(patient_id).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::alert::MockSendAlertServiceTrait;
    use crate::testing::patient_with_baseline;
    use mockall::predicate::eq;
    use patient_health_data::repository::MockPatientInfoRepositoryTrait;

    /// Repository mock returning one patient for `id`, expected to be read once
    fn repository_with(
        id: &'static str,
        temperature: i64,
        high: i32,
        low: i32,
    ) -> MockPatientInfoRepositoryTrait {
        let patient = patient_with_baseline(id, Decimal::from(temperature), high, low);
        let mut repository = MockPatientInfoRepositoryTrait::new();
        repository
            .expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(patient.clone()));
        repository
    }

    fn alerts_expecting(times: usize) -> MockSendAlertServiceTrait {
        let mut alerts = MockSendAlertServiceTrait::new();
        alerts.expect_send().times(times).returning(|_| Ok(()));
        alerts
    }

    #[test]
    fn test_threshold_is_one_and_a_half() {
        assert_eq!(TEMPERATURE_DEVIATION_THRESHOLD, Decimal::new(15, 1));
    }

    #[test]
    fn test_alert_message_format() {
        assert_eq!(alert_message("1"), "Warning, patient with id: 1, need help");
        assert_eq!(alert_message("1266"), "Warning, patient with id: 1266, need help");
    }

    #[test]
    fn test_temperature_deviates_boundaries() {
        let baseline = Decimal::new(366, 1);

        assert!(!temperature_deviates(baseline, baseline));
        assert!(!temperature_deviates(baseline, Decimal::new(381, 1)));
        assert!(!temperature_deviates(baseline, Decimal::new(351, 1)));
        assert!(temperature_deviates(baseline, Decimal::new(382, 1)));
        assert!(temperature_deviates(baseline, Decimal::new(350, 1)));

        // Opposite signs whose difference overflows
        assert!(temperature_deviates(Decimal::MAX, Decimal::MIN));
        assert!(temperature_deviates(Decimal::MIN, Decimal::MAX));
        assert!(!temperature_deviates(Decimal::MAX, Decimal::MAX));
    }

    #[test]
    fn test_blood_pressure_deviates_on_either_field() {
        let baseline = BloodPressure::new(120, 80);

        assert!(!blood_pressure_deviates(&baseline, &BloodPressure::new(120, 80)));
        assert!(blood_pressure_deviates(&baseline, &BloodPressure::new(121, 80)));
        assert!(blood_pressure_deviates(&baseline, &BloodPressure::new(120, 79)));
    }

    #[tokio::test]
    async fn test_check_blood_pressure_equal_sends_nothing() {
        let service = MedicalService::new(repository_with("1", 36, 120, 80), alerts_expecting(0));

        service
            .check_blood_pressure("1", BloodPressure::new(120, 80))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_blood_pressure_different_sends_once() {
        let service = MedicalService::new(repository_with("1", 36, 120, 80), alerts_expecting(1));

        service
            .check_blood_pressure("1", BloodPressure::new(130, 90))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_blood_pressure_message_carries_id() {
        for id in ["1", "5"] {
            let mut alerts = MockSendAlertServiceTrait::new();
            alerts
                .expect_send()
                .with(eq(alert_message(id)))
                .times(1)
                .returning(|_| Ok(()));
            let service = MedicalService::new(repository_with(id, 36, 120, 80), alerts);

            service
                .check_blood_pressure(id, BloodPressure::new(130, 90))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_check_temperature_equal_sends_nothing() {
        let service = MedicalService::new(repository_with("1", 36, 120, 80), alerts_expecting(0));

        service.check_temperature("1", Decimal::from(36)).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_temperature_deviation_sends_once() {
        let service = MedicalService::new(repository_with("1", 38, 120, 80), alerts_expecting(1));

        service.check_temperature("1", Decimal::from(36)).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_temperature_message_carries_id() {
        for id in ["1", "1266"] {
            let mut alerts = MockSendAlertServiceTrait::new();
            alerts
                .expect_send()
                .with(eq(alert_message(id)))
                .times(1)
                .returning(|_| Ok(()));
            let service = MedicalService::new(repository_with(id, 38, 120, 80), alerts);

            service.check_temperature(id, Decimal::from(36)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_check_temperature_exact_threshold_sends_nothing() {
        let service = MedicalService::new(repository_with("1", 38, 120, 80), alerts_expecting(0));

        service
            .check_temperature("1", Decimal::new(365, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_temperature_above_baseline_sends_once() {
        let service = MedicalService::new(repository_with("1", 36, 120, 80), alerts_expecting(1));

        service
            .check_temperature("1", Decimal::new(376, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_temperature_overflowing_difference_sends_once() {
        let patient = patient_with_baseline("1", Decimal::MAX, 120, 80);
        let mut repository = MockPatientInfoRepositoryTrait::new();
        repository
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(patient.clone()));
        let service = MedicalService::new(repository, alerts_expecting(1));

        service.check_temperature("1", Decimal::MIN).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_patient_is_not_found_and_sends_nothing() {
        let mut repository = MockPatientInfoRepositoryTrait::new();
        repository
            .expect_get_by_id()
            .times(2)
            .returning(|id| Err(RepositoryError::NotFound(id.to_string())));
        let service = MedicalService::new(repository, alerts_expecting(0));

        let result = service.check_blood_pressure("404", BloodPressure::new(120, 80)).await;
        assert!(matches!(result, Err(MedicalServiceError::NotFound(id)) if id == "404"));

        let result = service.check_temperature("404", Decimal::from(36)).await;
        assert!(matches!(result, Err(MedicalServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_repository_failure_is_propagated() {
        let mut repository = MockPatientInfoRepositoryTrait::new();
        repository
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::Lock("poisoned".to_string())));
        let service = MedicalService::new(repository, alerts_expecting(0));

        let result = service.check_temperature("1", Decimal::from(40)).await;
        let err = result.unwrap_err();
        assert!(matches!(err, MedicalServiceError::RepositoryError(_)));
        assert!(err.to_string().contains("poisoned"));
    }

    #[tokio::test]
    async fn test_notifier_failure_is_propagated() {
        let mut alerts = MockSendAlertServiceTrait::new();
        alerts
            .expect_send()
            .times(1)
            .returning(|_| Err(AlertError::Delivery("pager offline".to_string())));
        let service = MedicalService::new(repository_with("1", 36, 120, 80), alerts);

        let result = service.check_blood_pressure("1", BloodPressure::new(140, 95)).await;
        let err = result.unwrap_err();
        assert!(matches!(err, MedicalServiceError::Notifier(AlertError::Delivery(_))));
        assert_eq!(err.to_string(), "Alert delivery failed: pager offline");
    }
}
