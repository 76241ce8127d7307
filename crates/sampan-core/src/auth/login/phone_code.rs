use sampan_api::apis::auth_api;

use crate::{Client, auth::login::LoginError, session::Identity};

/// Log in with a phone number and a previously requested verification code.
///
/// Both values must be non-empty; everything further (number format, code
/// correctness, expiry) is judged by the backend.
pub(crate) async fn login_with_code(
    client: &Client,
    phone_number: String,
    code: String,
) -> Result<Identity, LoginError> {
    if phone_number.is_empty() || code.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let internal = &client.internal;
    let _session_guard = internal.session_flight.lock().await;

    let configurations = internal.get_api_configurations();
    let response =
        auth_api::post_code_login(&configurations.auth_config, phone_number, code).await?;

    let identity = Identity::from(response);
    internal.set_session(identity.clone()).await;
    Ok(identity)
}
