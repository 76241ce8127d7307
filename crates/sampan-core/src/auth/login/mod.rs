//! Login strategies for establishing a session.

mod bind_phone;
mod phone_code;
mod wechat;

use thiserror::Error;

pub use bind_phone::BindPhoneError;
pub(crate) use bind_phone::bind_phone_number;
pub(crate) use phone_code::login_with_code;
pub(crate) use wechat::{login_silently, login_with_profile_consent};

use crate::platform::PlatformError;

/// Errors from the login strategies.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Phone number or verification code was empty.
    #[error("Phone number and verification code must not be empty")]
    MissingCredentials,

    /// The platform bridge failed or the user declined a consent dialog.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[allow(missing_docs)]
    #[error(transparent)]
    Api(#[from] sampan_api::Error),
}
