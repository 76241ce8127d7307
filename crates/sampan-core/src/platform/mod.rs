//! Platform integration points: the state registry and the platform bridge.

mod platform_client;
mod state_client;
pub(crate) mod wechat;

pub use platform_client::PlatformClient;
pub use state_client::StateClient;
pub use wechat::{PHONE_CONSENT_GRANTED, PhoneConsentEvent, PlatformError, WechatPlatform};
