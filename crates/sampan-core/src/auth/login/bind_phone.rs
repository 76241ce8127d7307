use sampan_api::apis::auth_api;
use thiserror::Error;
use tracing::debug;

use crate::{
    Client, MissingFieldError, NotAuthenticatedError, platform::PhoneConsentEvent, require,
    session::Identity,
};

/// Errors from binding a phone number to the current session.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum BindPhoneError {
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    #[error(transparent)]
    NotAuthenticated(#[from] NotAuthenticatedError),

    #[error(transparent)]
    Api(#[from] sampan_api::Error),
}

/// Redeem a consent event into a phone number bound to the current session.
///
/// A denied consent resolves to `Ok(None)` with no side effects. On success
/// the number is merged into the current identity; every other field,
/// including the token, is preserved.
pub(crate) async fn bind_phone_number(
    client: &Client,
    event: PhoneConsentEvent,
) -> Result<Option<Identity>, BindPhoneError> {
    if !event.granted() {
        debug!("Phone consent not granted, nothing to bind");
        return Ok(None);
    }
    let code = require!(event.code);

    let internal = &client.internal;
    let _session_guard = internal.session_flight.lock().await;

    let configurations = internal.get_api_configurations();
    let response = auth_api::post_phone_bind(&configurations.auth_config, code).await?;

    // The backend accepted an anonymous bind; without a session there is
    // nothing to merge the number into.
    let current = internal.current_session().ok_or(NotAuthenticatedError)?;

    let merged = current.with_phone_number(response.phone_number);
    internal.set_session(merged.clone()).await;
    Ok(Some(merged))
}
