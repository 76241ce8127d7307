use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UserInfoModel;

/// Errors produced by the platform bridge.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The user declined the consent dialog.
    #[error("The user declined the request")]
    Declined,

    /// No platform bridge was configured for this client.
    #[error("No platform bridge is configured")]
    Unavailable,

    /// The platform call itself failed.
    #[error("Platform call failed: {0}")]
    Failed(String),
}

/// Bridge to the hosting platform's account facilities.
///
/// Implemented by the embedding application over the platform SDK and passed
/// in through [`Client::new_with_platform`](crate::Client::new_with_platform);
/// this crate never talks to the platform directly.
#[async_trait::async_trait]
pub trait WechatPlatform: std::fmt::Debug + Send + Sync {
    /// Obtain a fresh one-time login code.
    async fn login_code(&self) -> Result<String, PlatformError>;

    /// Ask the user to share their profile.
    ///
    /// Returns [`PlatformError::Declined`] when the user refuses.
    async fn request_user_profile(&self) -> Result<UserInfoModel, PlatformError>;
}

/// Stand-in used when the client was built without a platform bridge.
#[derive(Debug)]
pub(crate) struct UnconfiguredPlatform;

#[async_trait::async_trait]
impl WechatPlatform for UnconfiguredPlatform {
    async fn login_code(&self) -> Result<String, PlatformError> {
        Err(PlatformError::Unavailable)
    }

    async fn request_user_profile(&self) -> Result<UserInfoModel, PlatformError> {
        Err(PlatformError::Unavailable)
    }
}

/// Outcome string the platform uses for a granted phone-number consent.
pub const PHONE_CONSENT_GRANTED: &str = "getPhoneNumber:ok";

/// Result of the platform's phone-number consent button, forwarded verbatim
/// by the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneConsentEvent {
    /// Outcome sentinel; only [`PHONE_CONSENT_GRANTED`] means consent.
    pub err_msg: String,
    /// Encrypted phone-number grant, present when consent was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl PhoneConsentEvent {
    /// Whether the user granted access to their phone number.
    pub fn granted(&self) -> bool {
        self.err_msg == PHONE_CONSENT_GRANTED
    }
}
