use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Display profile carried by login payloads.
///
/// The backend may omit individual fields for users that have never shared a
/// profile, so everything defaults to its empty form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoModel {
    /// Url of the user's avatar image. Empty until a profile is shared.
    #[serde(default)]
    pub avatar_url: String,
    /// Display name. Empty until a profile is shared.
    #[serde(default)]
    pub nick_name: String,
    /// Platform gender code.
    #[serde(default)]
    pub gender: Gender,
    /// Phone number, present once the account has one bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl UserInfoModel {
    #[allow(missing_docs)]
    pub fn new(avatar_url: String, nick_name: String, gender: Gender) -> Self {
        Self {
            avatar_url,
            nick_name,
            gender,
            phone_number: None,
        }
    }
}

/// Gender code used by the platform profile payloads.
#[derive(
    Serialize_repr, Deserialize_repr, Debug, JsonSchema, Clone, Copy, Default, PartialEq, Eq,
)]
#[repr(u8)]
pub enum Gender {
    /// Not disclosed.
    #[default]
    Unknown = 0,
    #[allow(missing_docs)]
    Male = 1,
    #[allow(missing_docs)]
    Female = 2,
}
