//! Authentication module
//!
//! Contains the login strategies, phone binding, verification-code
//! sending and session teardown.

#[allow(missing_docs)]
pub mod auth_client;
pub mod login;
mod logout;
pub(crate) mod verification;

pub use auth_client::AuthClient;
pub use login::{BindPhoneError, LoginError};
pub use verification::SendCodeError;
