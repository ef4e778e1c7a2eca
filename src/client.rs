use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LLMError;

const DEFAULT_TEMPERATURE: f32 = 0.6;
const DEFAULT_MAX_TOKENS: u32 = 512;

/// Sampling parameters forwarded to every backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateParams {
    /// Sampling temperature (0.0-1.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// A backend able to answer a single prompt with text.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Short identifier of the backend, e.g. `"chatgpt"`.
    fn name(&self) -> &str;

    /// Sends `prompt` and returns the generated text.
    async fn generate(&self, prompt: &str, params: &GenerateParams) -> Result<String, LLMError>;
}
