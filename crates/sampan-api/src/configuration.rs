/// Connection settings shared by every api call.
///
/// The embedded [`reqwest::Client`] carries connection pools and timeouts, so
/// clones of a configuration stay cheap and reuse the same pool.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base url of the backend, without a trailing slash.
    pub base_path: String,
    /// Value for the `User-Agent` header, when set.
    pub user_agent: Option<String>,
    /// The underlying HTTP client.
    pub client: reqwest::Client,
    /// Bearer credential attached to requests once a session exists.
    pub access_token: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_path: "http://localhost:8123".to_owned(),
            user_agent: None,
            client: reqwest::Client::new(),
            access_token: None,
        }
    }
}
