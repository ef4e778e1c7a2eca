//! Offline backend returning canned answers.

use async_trait::async_trait;

use crate::{
    client::{GenerateParams, LLMClient},
    error::LLMError,
};

const PROMPT_PREVIEW_CHARS: usize = 80;

const ENTROPY_CHAT: &str = "Entropy measures how energy disperses and how many microstates are possible; \
put simply, it is a way to quantify disorder.";
const ENTROPY_OTHER: &str = "Entropy is a thermodynamic quantity tied to irreversibility; \
isolated systems drift toward more probable states (higher entropy).";

/// Deterministic client used when `MOCK_MODE` is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockClient {
    name: String,
}

impl MockClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("mock")
    }
}

#[async_trait]
impl LLMClient for MockClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str, _params: &GenerateParams) -> Result<String, LLMError> {
        if prompt.to_lowercase().contains("entropy") {
            let text = if self.name.starts_with("chat") {
                ENTROPY_CHAT
            } else {
                ENTROPY_OTHER
            };
            return Ok(text.to_string());
        }
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        Ok(format!("[{}] Simulated answer to prompt: {preview}...", self.name))
    }
}
