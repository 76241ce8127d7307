use sampan_state::repository::{Repository, RepositoryError};

/// A [`Repository`] whose every operation fails, for exercising storage
/// failure containment.
#[derive(Debug, Default)]
pub struct FailingRepository;

#[async_trait::async_trait]
impl Repository for FailingRepository {
    async fn get(&self, _key: String) -> Result<Option<String>, RepositoryError> {
        Err(RepositoryError::Internal("storage unavailable".to_string()))
    }

    async fn set(&self, _key: String, _value: String) -> Result<(), RepositoryError> {
        Err(RepositoryError::Internal("storage unavailable".to_string()))
    }

    async fn remove(&self, _key: String) -> Result<(), RepositoryError> {
        Err(RepositoryError::Internal("storage unavailable".to_string()))
    }
}
