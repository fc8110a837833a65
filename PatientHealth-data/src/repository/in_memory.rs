use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::models::patient::PatientInfo;
use super::errors::RepositoryError;

/// In-memory storage for patient records, keyed by identifier
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryStorage {
    patients: Arc<RwLock<HashMap<String, PatientInfo>>>,
}

impl InMemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    pub fn store(&self, patient: PatientInfo) -> Result<(), RepositoryError> {
        let mut store = self.patients.write()?;
        store.insert(patient.id.clone(), patient);
        Ok(())
    }

    /// Replace an existing record, failing if the identifier is unknown
    pub fn replace(&self, patient: PatientInfo) -> Result<(), RepositoryError> {
        let mut store = self.patients.write()?;
        match store.get_mut(&patient.id) {
            Some(existing) => {
                *existing = patient;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(patient.id)),
        }
    }

    /// Look up a record by identifier
    pub fn get(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
        let store = self.patients.read()?;
        Ok(store.get(id).cloned())
    }

    /// Number of stored records
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.patients.read()?.len())
    }

    /// Whether no records are stored
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}
