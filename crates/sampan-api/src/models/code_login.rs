use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request body for `POST /auth/login/code`.
///
/// The backend reuses its generic credential shape: the phone number travels
/// as `username` and the verification code as `password`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeLoginRequestModel {
    #[allow(missing_docs)]
    pub username: String,
    #[allow(missing_docs)]
    pub password: String,
}

impl CodeLoginRequestModel {
    #[allow(missing_docs)]
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}
