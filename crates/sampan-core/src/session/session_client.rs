use tokio::sync::watch;

use crate::{Client, session::Identity};

/// Wrapper for session state observation.
pub struct SessionClient {
    pub(crate) client: Client,
}

impl SessionClient {
    /// The currently published session, if any.
    pub fn current(&self) -> Option<Identity> {
        self.client.internal.current_session()
    }

    /// Whether an authenticated session is currently published.
    pub fn is_authenticated(&self) -> bool {
        self.current()
            .is_some_and(|identity| identity.is_authenticated())
    }

    /// Subscribe to session changes.
    ///
    /// The receiver starts out holding the current value; awaiting
    /// `changed()` resolves on the next publish.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.client.internal.publisher.subscribe()
    }
}

impl Client {
    /// Access to session state.
    pub fn session(&self) -> SessionClient {
        SessionClient {
            client: self.clone(),
        }
    }
}
