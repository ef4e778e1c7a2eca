use thiserror::Error;

/// Error types that can occur while querying backends or selecting a response.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// The provider answered but refused or could not produce a completion
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Unknown strategy or backend, malformed parameters, unreadable settings
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// A selection listener refused or failed to handle an event
    #[error("Listener error: {0}")]
    ListenerError(String),
}

impl LLMError {
    /// Short variant name, used when a failure is folded into a placeholder response.
    pub fn kind(&self) -> &'static str {
        match self {
            LLMError::HttpError(_) => "HttpError",
            LLMError::AuthError(_) => "AuthError",
            LLMError::ProviderError(_) => "ProviderError",
            LLMError::ResponseFormatError { .. } => "ResponseFormatError",
            LLMError::JsonError(_) => "JsonError",
            LLMError::ConfigError(_) => "ConfigError",
            LLMError::ListenerError(_) => "ListenerError",
        }
    }
}

/// Converts reqwest HTTP errors into LlmErrors. The request URL is dropped
/// since it can carry credentials.
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

impl From<toml::de::Error> for LLMError {
    fn from(err: toml::de::Error) -> Self {
        LLMError::ConfigError(format!("invalid settings file: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_the_variant() {
        assert_eq!(LLMError::HttpError("x".into()).kind(), "HttpError");
        assert_eq!(
            LLMError::ResponseFormatError {
                message: "m".into(),
                raw_response: "r".into(),
            }
            .kind(),
            "ResponseFormatError"
        );
        assert_eq!(LLMError::ListenerError("x".into()).kind(), "ListenerError");
        assert_eq!(LLMError::ProviderError("x".into()).kind(), "ProviderError");
    }

    #[tokio::test]
    async fn transport_errors_do_not_echo_the_url() {
        let err: LLMError = reqwest::Client::new()
            .get("http://127.0.0.1:9/path?key=hunter2")
            .send()
            .await
            .unwrap_err()
            .into();
        let text = err.to_string();
        assert!(text.starts_with("HTTP error:"));
        assert!(!text.contains("hunter2"), "{text}");
        assert!(!text.contains("127.0.0.1"), "{text}");
    }

    #[test]
    fn json_errors_carry_position() {
        let err: LLMError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        let text = err.to_string();
        assert!(text.starts_with("JSON parse error:"));
        assert!(text.contains("line 1"));
    }
}
