//! Google Gemini `generateContent` client.

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

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug)]
pub struct GoogleConfig {
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
}

/// Client for the Gemini API.
#[derive(Debug, Clone)]
pub struct Google {
    pub config: Arc<GoogleConfig>,
    pub client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest<'a> {
    contents: Vec<GoogleContent<'a>>,
    generation_config: GoogleGenerationConfig,
}

#[derive(Serialize)]
struct GoogleContent<'a> {
    parts: Vec<GooglePart<'a>>,
}

#[derive(Serialize)]
struct GooglePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
    prompt_feedback: Option<GooglePromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GooglePromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GoogleCandidate {
    content: GoogleResponseContent,
}

#[derive(Deserialize, Debug)]
struct GoogleResponseContent {
    #[serde(default)]
    parts: Vec<GoogleResponsePart>,
}

#[derive(Deserialize, Debug)]
struct GoogleResponsePart {
    text: String,
}

impl Google {
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        Self::with_client(http_client(timeout_seconds)?, api_key, model, None)
    }

    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, LLMError> {
        let api_key = require_key("Gemini", api_key.into())?;
        Ok(Self {
            config: Arc::new(GoogleConfig {
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
impl LLMClient for Google {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, params: &GenerateParams) -> Result<String, LLMError> {
        let body = GoogleRequest {
            contents: vec![GoogleContent {
                parts: vec![GooglePart { text: prompt }],
            }],
            generation_config: GoogleGenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let parsed: GoogleResponse = read_json("Gemini", resp).await?;
        if parsed.candidates.is_empty() {
            if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(LLMError::ProviderError(format!(
                    "Gemini blocked the prompt: {reason}"
                )));
            }
        }
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text.trim().to_string())
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: "Gemini response has no candidate text".to_string(),
                raw_response: String::new(),
            })
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::dispatch::failure_placeholder;

    #[tokio::test]
    async fn posts_generate_content_with_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "g-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"parts": [{"text": "why?"}]}],
                "generationConfig": {"maxOutputTokens": 512}
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"because\n"}]}}]}"#)
            .create_async()
            .await;

        let client = Google::with_client(
            Client::new(),
            "g-key",
            Some("gemini-test".into()),
            Some(server.url()),
        )
        .unwrap();
        let text = client
            .generate("why?", &GenerateParams::default())
            .await
            .unwrap();

        assert_eq!(text, "because");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn forbidden_is_an_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .with_body("denied")
            .create_async()
            .await;

        let client = Google::with_client(Client::new(), "g-key", None, Some(server.url())).unwrap();
        let err = client
            .generate("q", &GenerateParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }

    #[tokio::test]
    async fn blocked_prompt_is_a_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let client = Google::with_client(Client::new(), "g-key", None, Some(server.url())).unwrap();
        let err = client
            .generate("q", &GenerateParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::ProviderError(msg) if msg.contains("SAFETY")));
    }

    #[tokio::test]
    async fn unreachable_backend_placeholder_hides_the_key() {
        let key = "SUPER-SECRET-KEY";
        let client =
            Google::with_client(Client::new(), key, None, Some("http://127.0.0.1:9".into()))
                .unwrap();
        let err = client
            .generate("q", &GenerateParams::default())
            .await
            .unwrap_err();

        let text = failure_placeholder(&err);
        assert!(text.starts_with("[ERRO] HttpError"), "{text}");
        assert!(!text.contains(key), "{text}");
    }

    #[test]
    fn missing_key_fails_at_construction() {
        assert!(matches!(
            Google::new("", None, None),
            Err(LLMError::AuthError(_))
        ));
    }
}
