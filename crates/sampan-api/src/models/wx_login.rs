use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::UserInfoModel;

/// Request body for `POST /auth/wx/login`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WxLoginRequestModel {
    /// One-time login code issued by the platform.
    pub code: String,
    /// Client-asserted profile, sent only by the profile-consent flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfoModel>,
}

impl WxLoginRequestModel {
    #[allow(missing_docs)]
    pub fn new(code: String) -> Self {
        Self {
            code,
            user_info: None,
        }
    }

    /// Attach the client-asserted profile to the exchange.
    pub fn with_profile(code: String, user_info: UserInfoModel) -> Self {
        Self {
            code,
            user_info: Some(user_info),
        }
    }
}
