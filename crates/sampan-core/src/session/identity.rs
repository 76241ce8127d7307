use sampan_api::models::{Gender, LoginResponseModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The authenticated user as seen by views: display profile plus the
/// credential that proves the session.
///
/// `token.is_some()` is the sole authentication predicate. Every path that
/// builds an identity from a login response sets the token together with the
/// profile, so a profile without a credential is never published.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Url of the user's avatar image. Empty until a profile is shared.
    #[serde(default)]
    pub avatar_url: String,
    /// Display name. Empty until a profile is shared.
    #[serde(default)]
    pub nick_name: String,
    /// Platform gender code.
    #[serde(default)]
    pub gender: Gender,
    /// Phone number, present once a binding succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Opaque bearer credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Identity {
    /// Whether this identity carries a usable credential.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Merge a later-obtained phone number, preserving every other field
    /// including the token.
    pub(crate) fn with_phone_number(mut self, phone_number: String) -> Self {
        self.phone_number = Some(phone_number);
        self
    }
}

impl From<LoginResponseModel> for Identity {
    fn from(response: LoginResponseModel) -> Self {
        Self {
            avatar_url: response.user_info.avatar_url,
            nick_name: response.user_info.nick_name,
            gender: response.user_info.gender,
            phone_number: response.user_info.phone_number,
            token: Some(response.token),
        }
    }
}
