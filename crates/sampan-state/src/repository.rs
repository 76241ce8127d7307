/// An error resulting from operations on a repository.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// An internal unspecified error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A serialization or deserialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// A generic key-value storage interface, implemented by the client over the
/// platform's storage API.
///
/// Values are opaque strings; the SDK owns their encoding. Implementations
/// are expected to be durable across restarts but the SDK tolerates ones that
/// are not.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    /// Retrieves the value stored under `key`, if any.
    async fn get(&self, key: String) -> Result<Option<String>, RepositoryError>;
    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: String, value: String) -> Result<(), RepositoryError>;
    /// Removes the value stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: String) -> Result<(), RepositoryError>;
}

/// Validate that the provided key will be a valid identifier at compile time.
/// This is intentionally limited to ensure compatibility with current and future storage backends.
/// Valid characters are a-z, A-Z, and underscore (_).
pub const fn validate_storage_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        // Check if character is alphabetic (a-z, A-Z) or underscore
        if !((byte >= b'a' && byte <= b'z') || (byte >= b'A' && byte <= b'Z') || byte == b'_') {
            return false;
        }
        i += 1;
    }
    true
}
