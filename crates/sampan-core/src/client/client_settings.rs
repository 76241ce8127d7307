use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the target and behavior of the
/// sampan client. They are optional and uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use sampan_core::ClientSettings;
/// let settings = ClientSettings {
///     api_url: "http://localhost:8123".to_string(),
///     user_agent: "Sampan Rust-SDK".to_string(),
///     request_timeout: 30,
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The api url of the targeted backend. Defaults to `http://localhost:8123`
    pub api_url: String,
    /// The user_agent sent with every request. Defaults to `Sampan Rust-SDK`
    pub user_agent: String,
    /// Timeout in seconds applied to every request. Defaults to `30`
    pub request_timeout: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8123".into(),
            user_agent: "Sampan Rust-SDK".into(),
            request_timeout: 30,
        }
    }
}
