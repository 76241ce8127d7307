use std::{collections::HashMap, sync::RwLock};

use crate::repository::{Repository, RepositoryError};

/// In-memory [`Repository`] for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    values: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    async fn get(&self, key: String) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .get(&key)
            .cloned())
    }

    async fn set(&self, key: String, value: String) -> Result<(), RepositoryError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .remove(&key);
        Ok(())
    }
}
