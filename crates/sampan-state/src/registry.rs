use std::sync::{Arc, RwLock};

use crate::repository::Repository;

/// Holds the client-managed repository for the lifetime of a client.
///
/// Clients register their repository once during startup; the SDK looks it up
/// on every persistence operation and degrades to in-memory-only behavior
/// when none was registered.
pub struct StateRegistry {
    client_managed: RwLock<Option<Arc<dyn Repository>>>,
}

impl std::fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRegistry").finish()
    }
}

impl StateRegistry {
    /// Creates a new empty `StateRegistry`.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        StateRegistry {
            client_managed: RwLock::new(None),
        }
    }

    /// Registers a client-managed repository, replacing any previous one.
    pub fn register_client_managed(&self, value: Arc<dyn Repository>) {
        log::debug!("Registering client-managed repository");
        self.client_managed
            .write()
            .expect("RwLock should not be poisoned")
            .replace(value);
    }

    /// Retrieves the client-managed repository, if one was registered.
    pub fn get_client_managed(&self) -> Option<Arc<dyn Repository>> {
        self.client_managed
            .read()
            .expect("RwLock should not be poisoned")
            .as_ref()
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryRepository, repository::RepositoryError};

    #[tokio::test]
    async fn registered_repository_is_returned_and_shared() {
        let registry = StateRegistry::new();
        assert!(registry.get_client_managed().is_none());

        let repository = Arc::new(MemoryRepository::default());
        registry.register_client_managed(repository.clone());

        let looked_up = registry
            .get_client_managed()
            .expect("repository was registered");
        looked_up
            .set("key".to_string(), "value".to_string())
            .await
            .unwrap();

        assert_eq!(
            repository.get("key".to_string()).await.unwrap(),
            Some("value".to_string())
        );
    }

    #[tokio::test]
    async fn registering_again_replaces_the_repository() {
        let registry = StateRegistry::new();

        let first = Arc::new(MemoryRepository::default());
        first
            .set("key".to_string(), "first".to_string())
            .await
            .unwrap();
        registry.register_client_managed(first);

        let second = Arc::new(MemoryRepository::default());
        registry.register_client_managed(second);

        let looked_up = registry
            .get_client_managed()
            .expect("repository was registered");
        let value: Result<Option<String>, RepositoryError> = looked_up.get("key".to_string()).await;
        assert_eq!(value.unwrap(), None);
    }
}
