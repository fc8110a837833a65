use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Alert delivery errors
#[derive(Debug, Error)]
pub enum AlertError {
    /// The notifier could not deliver the message
    #[error("Alert delivery failed: {0}")]
    Delivery(String),
}

/// Trait for alert notifiers
///
/// The health checks call `send` at most once per check and never retry.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SendAlertServiceTrait: Send + Sync {
    /// Deliver an alert message
    async fn send(&self, message: &str) -> Result<(), AlertError>;
}

#[async_trait]
impl<T: SendAlertServiceTrait + ?Sized> SendAlertServiceTrait for Arc<T> {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        (**self).send(message).await
    }
}

/// Notifier that emits alerts as `warn` level tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAlertService;

#[async_trait]
impl SendAlertServiceTrait for LoggingAlertService {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        warn!(target: "patient_health::alert", "{}", message);
        Ok(())
    }
}

/// Notifier that prints alerts to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlertService;

#[async_trait]
impl SendAlertServiceTrait for ConsoleAlertService {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        println!("{}", message);
        Ok(())
    }
}

/// Notifier that keeps every message it is given, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingAlertService {
    messages: Arc<RwLock<Vec<String>>>,
}

impl RecordingAlertService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.read() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of messages sent so far
    pub fn count(&self) -> usize {
        match self.messages.read() {
            Ok(messages) => messages.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

#[async_trait]
impl SendAlertServiceTrait for RecordingAlertService {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        let mut messages = self
            .messages
            .write()
            .map_err(|e| AlertError::Delivery(e.to_string()))?;
        messages.push(message.to_string());
        Ok(())
    }
}
