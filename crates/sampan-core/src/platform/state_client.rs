use std::sync::Arc;

use sampan_state::repository::Repository;

use crate::Client;

/// Wrapper for state specific functionality.
pub struct StateClient {
    pub(crate) client: Client,
}

impl StateClient {
    /// Register the client managed state repository.
    pub fn register_client_managed(&self, store: Arc<dyn Repository>) {
        self.client
            .internal
            .repository_map
            .register_client_managed(store)
    }

    /// Get the client managed state repository, if one was registered.
    pub fn get_client_managed(&self) -> Option<Arc<dyn Repository>> {
        self.client.internal.repository_map.get_client_managed()
    }
}
