use std::sync::{Arc, RwLock};

use sampan_state::registry::StateRegistry;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    auth::verification::Verification,
    platform::WechatPlatform,
    session::{Identity, publisher::SessionPublisher, store::SessionStore},
};

#[allow(missing_docs)]
pub struct ApiConfigurations {
    pub auth_config: sampan_api::Configuration,
}

impl std::fmt::Debug for ApiConfigurations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfigurations").finish_non_exhaustive()
    }
}

impl ApiConfigurations {
    pub(crate) fn new(auth_config: sampan_api::Configuration) -> Arc<Self> {
        Arc::new(Self { auth_config })
    }

    /// Rebuild the configuration with a new bearer credential. Requests
    /// already in flight keep the configuration they started with.
    pub fn set_tokens(self: &mut Arc<Self>, token: Option<String>) {
        let mut auth_config = self.auth_config.clone();
        auth_config.access_token = token;

        *self = ApiConfigurations::new(auth_config);
    }
}

#[allow(missing_docs)]
pub struct InternalClient {
    /// Use Client::internal.get_api_configurations() to access this.
    #[doc(hidden)]
    pub(crate) __api_configurations: RwLock<Arc<ApiConfigurations>>,

    /// Holds the current session and notifies subscribers of changes.
    pub(crate) publisher: SessionPublisher,

    pub(crate) repository_map: StateRegistry,

    /// Bridge to the hosting platform's account facilities.
    pub(crate) wechat: Arc<dyn WechatPlatform>,

    /// Serializes session-mutating operations so overlapping logins, binds
    /// and logouts cannot interleave their publish/persist steps.
    pub(crate) session_flight: Mutex<()>,

    /// Send-code cooldown state machine.
    pub(crate) verification: Arc<Verification>,

    /// Root token for background work; cancelled on drop.
    pub(crate) cancellation_token: CancellationToken,
}

impl std::fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClient")
            .field("__api_configurations", &self.__api_configurations)
            .field("wechat", &self.wechat)
            .finish_non_exhaustive()
    }
}

impl InternalClient {
    #[allow(missing_docs)]
    pub fn get_api_configurations(&self) -> Arc<ApiConfigurations> {
        self.__api_configurations
            .read()
            .expect("RwLock is not poisoned")
            .clone()
    }

    /// The currently published session, if any.
    pub(crate) fn current_session(&self) -> Option<Identity> {
        self.publisher.current()
    }

    pub(crate) fn session_store(&self) -> SessionStore<'_> {
        SessionStore::new(&self.repository_map)
    }

    /// Publish `identity` and mirror its token into the api configuration.
    pub(crate) fn publish_session(&self, identity: Identity) {
        self.set_api_token(identity.token.clone());
        self.publisher.publish(Some(identity));
    }

    /// Establish `identity` as the current session: publish first, then
    /// write through to storage. Subscribers never wait on storage I/O.
    pub(crate) async fn set_session(&self, identity: Identity) {
        self.publish_session(identity.clone());
        self.session_store().save(&identity).await;
    }

    /// Tear down the current session: publish the absence first, then clear
    /// storage and stop any running send-code cooldown.
    pub(crate) async fn clear_session(&self) {
        debug!("Clearing session");
        self.set_api_token(None);
        self.publisher.publish(None);
        self.session_store().clear().await;
        self.verification.cancel_cooldown();
    }

    pub(crate) fn set_api_token(&self, token: Option<String>) {
        self.__api_configurations
            .write()
            .expect("RwLock is not poisoned")
            .set_tokens(token);
    }

    /// Cancel all background work owned by this client. Called automatically
    /// when the last clone of the client is dropped.
    pub fn shutdown(&self) {
        self.cancellation_token.cancel();
    }
}

impl Drop for InternalClient {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}
