//! OpenAI Chat Completions client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    client::{GenerateParams, LLMClient},
    error::LLMError,
};

use super::{http_client, read_json, require_key, trim_base};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// API key for authentication with OpenAI.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// API root, without a trailing slash.
    pub base_url: String,
}

/// Client for OpenAI's chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub config: Arc<OpenAIConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAI {
    /// Creates a client. Fails with `AuthError` when the key is blank.
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        Self::with_client(http_client(timeout_seconds)?, api_key, model, None)
    }

    /// Creates a client with a custom HTTP client and API root.
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, LLMError> {
        let api_key = require_key("OpenAI", api_key.into())?;
        Ok(Self {
            config: Arc::new(OpenAIConfig {
                api_key: SecretString::new(api_key),
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: trim_base(base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())),
            }),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl LLMClient for OpenAI {
    fn name(&self) -> &str {
        "chatgpt"
    }

    async fn generate(&self, prompt: &str, params: &GenerateParams) -> Result<String, LLMError> {
        let body = OpenAIChatRequest {
            model: &self.config.model,
            messages: vec![OpenAIChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("OpenAI request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let parsed: OpenAIChatResponse = read_json("OpenAI", resp).await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: "OpenAI response has no message content".to_string(),
                raw_response: String::new(),
            })
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> OpenAI {
        OpenAI::with_client(
            Client::new(),
            "test-key",
            Some("gpt-test".to_string()),
            Some(format!("{}/", server.url())),
        )
        .unwrap()
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = OpenAI::new("  ", None, None).unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }

    #[tokio::test]
    async fn sends_chat_request_and_trims_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-test",
                "messages": [{"role": "user", "content": "hello?"}],
                "max_tokens": 64
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  hi there \n"}}]}"#)
            .create_async()
            .await;

        let params = GenerateParams {
            temperature: 0.5,
            max_tokens: 64,
        };
        let text = client_for(&server).generate("hello?", &params).await.unwrap();

        assert_eq!(text, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_errors_become_http_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("q", &GenerateParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::HttpError(msg) if msg.contains("boom")));
    }

    #[tokio::test]
    async fn empty_choices_are_a_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("q", &GenerateParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::ResponseFormatError { .. }));
    }
}
