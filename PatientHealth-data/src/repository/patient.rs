use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::models::patient::{CreatePatientRequest, PatientInfo};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Repository trait for patient records
///
/// Implementations own the records; callers only read the baseline through
/// `get_by_id`.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PatientInfoRepositoryTrait: Send + Sync {
    /// Get a patient by ID, failing with `RepositoryError::NotFound` if absent
    async fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError>;

    /// Add a new patient and return the identifier assigned to it
    async fn add(&self, request: CreatePatientRequest) -> Result<String, RepositoryError>;

    /// Replace a stored patient and return its identifier
    async fn update(&self, patient: PatientInfo) -> Result<String, RepositoryError>;
}

/// Patient repository backed by process memory.
/// Records live only as long as the repository (and its clones).
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientRepository {
    storage: InMemoryStorage,
}

impl InMemoryPatientRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    /// Create a repository seeded with existing records
    pub fn with_patients(patients: Vec<PatientInfo>) -> Result<Self, RepositoryError> {
        let repository = Self::new();
        for patient in patients {
            repository.storage.store(patient)?;
        }
        Ok(repository)
    }

    /// Number of patients currently stored
    pub fn len(&self) -> Result<usize, RepositoryError> {
        self.storage.len()
    }

    /// Whether the repository holds no patients
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        self.storage.is_empty()
    }
}

#[async_trait]
impl PatientInfoRepositoryTrait for InMemoryPatientRepository {
    async fn get_by_id(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        debug!("Looking up patient {}", id);
        self.storage
            .get(id)?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn add(&self, request: CreatePatientRequest) -> Result<String, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        debug!("Adding patient {} {} as {}", request.name, request.surname, id);
        self.storage.store(request.into_patient(id.clone()))?;
        Ok(id)
    }

    async fn update(&self, patient: PatientInfo) -> Result<String, RepositoryError> {
        let id = patient.id.clone();
        debug!("Updating patient {}", id);
        self.storage.replace(patient)?;
        Ok(id)
    }
}
