use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::UserInfoModel;

/// Success payload shared by every token-issuing endpoint.
///
/// `token` is mandatory here on purpose: a login response that lacks it is a
/// protocol violation and fails deserialization instead of producing a
/// half-authenticated session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseModel {
    /// Opaque bearer credential for subsequent authenticated calls.
    pub token: String,
    /// Server-side profile of the authenticated user.
    pub user_info: UserInfoModel,
}
