//! Backend clients implementing [`LLMClient`](crate::client::LLMClient).

#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "huggingface")]
pub mod huggingface;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::LLMError;

/// Builds the shared HTTP client, optionally with a request timeout.
pub(crate) fn http_client(timeout_seconds: Option<u64>) -> Result<Client, LLMError> {
    let mut builder = Client::builder();
    if let Some(sec) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(sec));
    }
    Ok(builder.build()?)
}

/// Checks the status and decodes the body of a backend response.
///
/// 401/403 map to `AuthError`, any other non-2xx status to `HttpError`, and a
/// body that does not match `T` to `ResponseFormatError`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &str,
    resp: Response,
) -> Result<T, LLMError> {
    let status = resp.status();
    log::debug!("{provider} HTTP status: {status}");
    let raw = resp.text().await?;

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(LLMError::AuthError(format!("{provider} returned {status}: {raw}")));
    }
    if !status.is_success() {
        return Err(LLMError::HttpError(format!("{provider} returned {status}: {raw}")));
    }

    log::trace!("{provider} response body: {raw}");
    serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
        message: format!("failed to decode {provider} response: {err}"),
        raw_response: raw,
    })
}

/// Rejects blank API keys before any request is made.
pub(crate) fn require_key(provider: &str, key: String) -> Result<String, LLMError> {
    if key.trim().is_empty() {
        return Err(LLMError::AuthError(format!("Missing {provider} API key")));
    }
    Ok(key)
}

pub(crate) fn trim_base(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}
