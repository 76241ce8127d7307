//! Bindings for the `/auth` endpoint family.

use crate::{
    Configuration, Error,
    apis::{require_data, send_auth_request},
    models::{
        CodeLoginRequestModel, LoginResponseModel, PhoneBindRequestModel, PhoneBindResponseModel,
        SendCodeRequestModel, UserInfoModel, WxLoginRequestModel,
    },
};

/// Exchange a platform login code for a session token and profile.
pub async fn post_wx_login(
    configuration: &Configuration,
    code: String,
) -> Result<LoginResponseModel, Error> {
    wx_login(configuration, WxLoginRequestModel::new(code)).await
}

/// Exchange a platform login code together with a client-asserted profile.
pub async fn post_wx_login_with_profile(
    configuration: &Configuration,
    code: String,
    user_info: UserInfoModel,
) -> Result<LoginResponseModel, Error> {
    wx_login(
        configuration,
        WxLoginRequestModel::with_profile(code, user_info),
    )
    .await
}

async fn wx_login(
    configuration: &Configuration,
    body: WxLoginRequestModel,
) -> Result<LoginResponseModel, Error> {
    let envelope = send_auth_request(configuration, "/auth/wx/login", &body).await?;
    require_data(envelope)
}

/// Redeem a phone-number grant and bind the number to the current account.
///
/// The configured bearer credential identifies the account; without one the
/// backend decides whether to reject the call.
pub async fn post_phone_bind(
    configuration: &Configuration,
    code: String,
) -> Result<PhoneBindResponseModel, Error> {
    let body = PhoneBindRequestModel::new(code);
    let envelope = send_auth_request(configuration, "/auth/phone", &body).await?;
    require_data(envelope)
}

/// Log in with a phone number and a verification code.
pub async fn post_code_login(
    configuration: &Configuration,
    username: String,
    password: String,
) -> Result<LoginResponseModel, Error> {
    let body = CodeLoginRequestModel::new(username, password);
    let envelope = send_auth_request(configuration, "/auth/login/code", &body).await?;
    require_data(envelope)
}

/// Ask the backend to text a verification code to `username`.
///
/// Acceptance is the whole payload, so success is just `Ok(())`.
pub async fn post_send_code(configuration: &Configuration, username: String) -> Result<(), Error> {
    let body = SendCodeRequestModel::new(username);
    send_auth_request::<serde_json::Value>(configuration, "/auth/code", &body).await?;
    Ok(())
}
