//! Hugging Face Inference API text-generation client.

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

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

#[derive(Debug)]
pub struct HuggingFaceConfig {
    pub api_token: SecretString,
    pub model: String,
    pub base_url: String,
}

/// Client for hosted text-generation models.
#[derive(Debug, Clone)]
pub struct HuggingFace {
    pub config: Arc<HuggingFaceConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct HFRequest<'a> {
    inputs: &'a str,
    parameters: HFParameters,
}

#[derive(Serialize)]
struct HFParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize, Debug)]
struct HFGenerated {
    generated_text: String,
}

/// The API answers with either a list of generations or a single one.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum HFResponse {
    Many(Vec<HFGenerated>),
    One(HFGenerated),
}

impl HFResponse {
    fn into_text(self) -> Option<String> {
        match self {
            HFResponse::Many(list) => list.into_iter().next().map(|g| g.generated_text),
            HFResponse::One(one) => Some(one.generated_text),
        }
    }
}

impl HuggingFace {
    pub fn new(
        api_token: impl Into<String>,
        model: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        Self::with_client(http_client(timeout_seconds)?, api_token, model, None)
    }

    pub fn with_client(
        client: Client,
        api_token: impl Into<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, LLMError> {
        let api_token = require_key("Hugging Face", api_token.into())?;
        Ok(Self {
            config: Arc::new(HuggingFaceConfig {
                api_token: SecretString::new(api_token),
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
impl LLMClient for HuggingFace {
    fn name(&self) -> &str {
        "hf"
    }

    async fn generate(&self, prompt: &str, params: &GenerateParams) -> Result<String, LLMError> {
        let body = HFRequest {
            inputs: prompt,
            parameters: HFParameters {
                max_new_tokens: params.max_tokens,
                temperature: params.temperature,
                return_full_text: false,
            },
        };

        let resp = self
            .client
            .post(format!("{}/models/{}", self.config.base_url, self.config.model))
            .bearer_auth(self.config.api_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let parsed: HFResponse = read_json("Hugging Face", resp).await?;
        parsed
            .into_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: "Hugging Face returned no generations".to_string(),
                raw_response: "[]".to_string(),
            })
    }
}
