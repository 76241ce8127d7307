use sampan_api::apis::auth_api;
use tracing::{debug, instrument};

use crate::{Client, auth::login::LoginError, session::Identity};

/// Exchange a fresh platform code for a session without user interaction.
#[instrument(err, skip_all)]
pub(crate) async fn login_silently(client: &Client) -> Result<Identity, LoginError> {
    let internal = &client.internal;
    let _session_guard = internal.session_flight.lock().await;

    let code = internal.wechat.login_code().await?;
    let configurations = internal.get_api_configurations();
    let response = auth_api::post_wx_login(&configurations.auth_config, code).await?;

    let identity = Identity::from(response);
    internal.set_session(identity.clone()).await;
    debug!("Silent login established a session");
    Ok(identity)
}

/// Ask the user to share their profile, then exchange a fresh platform code
/// forwarding the asserted profile.
///
/// A declined consent fails the whole strategy; the published session stays
/// untouched.
#[instrument(err, skip_all)]
pub(crate) async fn login_with_profile_consent(client: &Client) -> Result<Identity, LoginError> {
    let internal = &client.internal;
    let _session_guard = internal.session_flight.lock().await;

    let profile = internal.wechat.request_user_profile().await?;
    let code = internal.wechat.login_code().await?;
    let configurations = internal.get_api_configurations();
    let response =
        auth_api::post_wx_login_with_profile(&configurations.auth_config, code, profile).await?;

    let identity = Identity::from(response);
    internal.set_session(identity.clone()).await;
    Ok(identity)
}
