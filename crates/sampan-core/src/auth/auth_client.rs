use tokio::sync::watch;

use crate::{
    Client,
    auth::{
        login::{self, BindPhoneError, LoginError},
        logout,
        verification::{self, SendCodeError},
    },
    platform::PhoneConsentEvent,
    session::Identity,
};

/// Subclient containing auth functionality.
#[derive(Clone)]
pub struct AuthClient {
    pub(crate) client: Client,
}

impl AuthClient {
    /// Log in silently with a fresh platform code.
    pub async fn login_silently(&self) -> Result<Identity, LoginError> {
        login::login_silently(&self.client).await
    }

    /// Ask for profile consent, then log in forwarding the asserted profile.
    pub async fn login_with_profile_consent(&self) -> Result<Identity, LoginError> {
        login::login_with_profile_consent(&self.client).await
    }

    /// Log in with a phone number and a verification code.
    pub async fn login_with_code(
        &self,
        phone_number: String,
        code: String,
    ) -> Result<Identity, LoginError> {
        login::login_with_code(&self.client, phone_number, code).await
    }

    /// Bind the phone number from a consent event to the current session.
    ///
    /// Resolves to `Ok(None)` when consent was not granted.
    pub async fn bind_phone_number(
        &self,
        event: PhoneConsentEvent,
    ) -> Result<Option<Identity>, BindPhoneError> {
        login::bind_phone_number(&self.client, event).await
    }

    /// Ask the backend to text a verification code to `phone_number`.
    pub async fn send_verification_code(&self, phone_number: String) -> Result<(), SendCodeError> {
        verification::send_verification_code(&self.client, phone_number).await
    }

    /// Remaining send-code cooldown in seconds; zero when idle.
    pub fn cooldown_seconds(&self) -> u8 {
        self.client.internal.verification.cooldown_seconds()
    }

    /// Subscribe to cooldown updates for rendering a countdown.
    pub fn subscribe_cooldown(&self) -> watch::Receiver<u8> {
        self.client.internal.verification.subscribe()
    }

    /// Tear down the current session. Idempotent; also stops a running
    /// send-code cooldown.
    pub async fn logout(&self) {
        logout::logout(&self.client).await
    }

    /// Load the persisted session, publish it and return it.
    pub async fn restore_session(&self) -> Option<Identity> {
        logout::restore_session(&self.client).await
    }
}

impl Client {
    /// Access to authentication functionality.
    pub fn auth(&self) -> AuthClient {
        AuthClient {
            client: self.clone(),
        }
    }
}
