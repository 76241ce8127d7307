//! Error types for api operations.

/// An error returned by the api client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backend accepted the request but rejected it with a business envelope
    /// (`code` other than zero). The message is shown to users as-is.
    #[error("{message}")]
    Business {
        /// Backend-defined rejection code.
        code: i64,
        /// Human-readable rejection reason from the envelope.
        message: String,
    },

    /// Server returned an HTTP error response without a business envelope.
    #[error("API error {status}: {content}")]
    Response {
        /// HTTP status code of the response.
        status: reqwest::StatusCode,
        /// Raw response body content.
        content: String,
    },

    /// Could not reach the server (DNS failure, timeout, TLS error, connection refused, etc.)
    #[error("not connected: {0}")]
    NotConnected(String),

    /// Catch-all for other errors (serialization, envelope violations, etc.)
    #[error("other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Error::Response {
                status,
                // Can't get the response body from a reqwest::Error, so just leave it empty.
                // Callers that have the body build this variant themselves.
                content: String::new(),
            };
        }

        // Consider connection errors, timeouts, and errors sending requests as "not connected",
        // since they all indicate a failure to communicate with the server.
        if e.is_connect() || e.is_timeout() || e.is_request() {
            return Error::NotConnected(e.to_string());
        }

        Error::Other(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(e.to_string())
    }
}
