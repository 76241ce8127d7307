use sampan_state::{
    registry::StateRegistry,
    repository::{Repository, RepositoryError, validate_storage_key},
};
use tracing::{debug, error, warn};

use crate::session::Identity;

/// Storage key of the serialized session record.
pub(crate) const USER_INFO_KEY: &str = "userInfo";
/// Storage key of the duplicated raw token.
pub(crate) const TOKEN_KEY: &str = "token";

const _: () = {
    assert!(validate_storage_key(USER_INFO_KEY));
    assert!(validate_storage_key(TOKEN_KEY));
};

/// Write-through persistence for the session, layered over the registered
/// client-managed repository.
///
/// Storage failures are absorbed and logged; the publisher stays
/// authoritative and a client without a repository keeps a purely in-memory
/// session.
pub(crate) struct SessionStore<'a> {
    registry: &'a StateRegistry,
}

impl<'a> SessionStore<'a> {
    pub(crate) fn new(registry: &'a StateRegistry) -> Self {
        Self { registry }
    }

    /// Load the persisted session record, if a readable one exists.
    pub(crate) async fn load(&self) -> Option<Identity> {
        let Some(repository) = self.registry.get_client_managed() else {
            debug!("No repository registered, nothing to restore");
            return None;
        };

        match repository.get(USER_INFO_KEY.to_string()).await {
            Ok(Some(record)) => match serde_json::from_str(&record) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!("Discarding unreadable session record: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read the session record: {e}");
                None
            }
        }
    }

    /// Persist `identity` under both storage keys as one logical write.
    ///
    /// An identity without a token is never written; the record and its raw
    /// token duplicate only ever change together.
    pub(crate) async fn save(&self, identity: &Identity) {
        if identity.token.is_none() {
            error!("Refusing to persist a session without a token");
            return;
        }

        let Some(repository) = self.registry.get_client_managed() else {
            debug!("No repository registered, the session stays in memory only");
            return;
        };

        if let Err(e) = write_record(repository.as_ref(), identity).await {
            warn!("Failed to persist the session: {e}");
        }
    }

    /// Remove both storage keys.
    pub(crate) async fn clear(&self) {
        let Some(repository) = self.registry.get_client_managed() else {
            return;
        };

        if let Err(e) = remove_record(repository.as_ref()).await {
            warn!("Failed to clear the persisted session: {e}");
        }
    }
}

async fn write_record(
    repository: &dyn Repository,
    identity: &Identity,
) -> Result<(), RepositoryError> {
    let record = serde_json::to_string(identity)?;
    repository.set(USER_INFO_KEY.to_string(), record).await?;

    if let Some(token) = &identity.token {
        repository.set(TOKEN_KEY.to_string(), token.clone()).await?;
    }

    Ok(())
}

async fn remove_record(repository: &dyn Repository) -> Result<(), RepositoryError> {
    repository.remove(USER_INFO_KEY.to_string()).await?;
    repository.remove(TOKEN_KEY.to_string()).await
}
