use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request body for `POST /auth/phone`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneBindRequestModel {
    /// Encrypted phone-number grant from the platform consent button.
    pub code: String,
}

impl PhoneBindRequestModel {
    #[allow(missing_docs)]
    pub fn new(code: String) -> Self {
        Self { code }
    }
}

/// Success payload of `POST /auth/phone`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneBindResponseModel {
    /// The phone number the backend decrypted and attached to the account.
    pub phone_number: String,
}
