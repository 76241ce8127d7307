use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request body for `POST /auth/code`.
///
/// Same generic credential shape as the code login: the phone number travels
/// as `username`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequestModel {
    #[allow(missing_docs)]
    pub username: String,
}

impl SendCodeRequestModel {
    #[allow(missing_docs)]
    pub fn new(username: String) -> Self {
        Self { username }
    }
}
