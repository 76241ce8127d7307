use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use sampan_state::registry::StateRegistry;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::internal::{ApiConfigurations, InternalClient};
use crate::{
    auth::verification::Verification,
    client::client_settings::ClientSettings,
    platform::{WechatPlatform, wechat::UnconfiguredPlatform},
    session::publisher::SessionPublisher,
};

/// The main struct to interact with the sampan SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance, so all mutable state needs to live behind the Arc as part
    // of the [`InternalClient`] struct.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new sampan client without a platform bridge.
    ///
    /// Phone-number login and verification codes work without one; the
    /// platform login flows fail with
    /// [`PlatformError::Unavailable`](crate::platform::PlatformError::Unavailable).
    pub fn new(settings: Option<ClientSettings>) -> Self {
        Self::new_internal(settings, Arc::new(UnconfiguredPlatform))
    }

    /// Create a new sampan client with a client-provided platform bridge.
    pub fn new_with_platform(
        settings: Option<ClientSettings>,
        platform: Arc<dyn WechatPlatform>,
    ) -> Self {
        Self::new_internal(settings, platform)
    }

    fn new_internal(settings_input: Option<ClientSettings>, wechat: Arc<dyn WechatPlatform>) -> Self {
        let settings = settings_input.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .build()
            .expect("HTTP client build should not fail");

        let auth_config = sampan_api::Configuration {
            base_path: settings.api_url,
            user_agent: Some(settings.user_agent),
            client: http_client,
            access_token: None,
        };

        Self {
            internal: Arc::new(InternalClient {
                __api_configurations: RwLock::new(ApiConfigurations::new(auth_config)),
                publisher: SessionPublisher::new(),
                repository_map: StateRegistry::new(),
                wechat,
                session_flight: Mutex::new(()),
                verification: Arc::new(Verification::new()),
                cancellation_token: CancellationToken::new(),
            }),
        }
    }
}
