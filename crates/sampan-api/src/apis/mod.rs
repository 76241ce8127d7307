//! Endpoint functions for the sampan backend.

pub mod auth_api;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Configuration, Error};

/// Envelope wrapping every backend response body.
#[derive(Deserialize, Debug)]
pub(crate) struct ResponseEnvelope<T> {
    pub(crate) code: i64,
    pub(crate) message: Option<String>,
    pub(crate) data: Option<T>,
}

/// Send a JSON `POST` to `path` and interpret the response envelope.
///
/// The bearer credential and `User-Agent` from the configuration are attached
/// when present. Business rejections (`code != 0`) come back as
/// [`Error::Business`] regardless of the HTTP status the backend picked.
pub(crate) async fn send_auth_request<T: DeserializeOwned>(
    configuration: &Configuration,
    path: &str,
    body: &impl Serialize,
) -> Result<ResponseEnvelope<T>, Error> {
    let url = format!("{}{}", configuration.base_path, path);

    let mut request = configuration
        .client
        .post(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(body);

    if let Some(user_agent) = &configuration.user_agent {
        request = request.header(reqwest::header::USER_AGENT, user_agent.clone());
    }
    if let Some(token) = &configuration.access_token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    let content = response.text().await?;

    parse_envelope(status, &content)
}

fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    content: &str,
) -> Result<ResponseEnvelope<T>, Error> {
    if status.is_success() {
        let envelope: ResponseEnvelope<T> = serde_json::from_str(content)?;
        return match envelope.code {
            0 => Ok(envelope),
            code => Err(Error::Business {
                code,
                message: envelope.message.unwrap_or_default(),
            }),
        };
    }

    // Some backend middlewares send the business envelope together with an
    // error status; prefer the typed rejection when the body carries one.
    if let Ok(envelope) = serde_json::from_str::<ResponseEnvelope<serde_json::Value>>(content) {
        if envelope.code != 0 {
            return Err(Error::Business {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }
    }

    Err(Error::Response {
        status,
        content: content.to_owned(),
    })
}

/// Unwrap the `data` payload of a successful envelope.
///
/// Operations with a payload treat a missing `data` as a protocol violation.
pub(crate) fn require_data<T>(envelope: ResponseEnvelope<T>) -> Result<T, Error> {
    envelope
        .data
        .ok_or_else(|| Error::Other("success response is missing its data payload".to_owned()))
}
