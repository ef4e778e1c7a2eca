use crate::error::LLMError;

/// Supported LLM backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMBackend {
    OpenAI,
    Google,
    HuggingFace,
    Mock,
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chatgpt" | "openai" | "gpt" => Ok(LLMBackend::OpenAI),
            "gemini" | "google" => Ok(LLMBackend::Google),
            "hf" | "huggingface" => Ok(LLMBackend::HuggingFace),
            "mock" => Ok(LLMBackend::Mock),
            _ => Err(LLMError::ConfigError(format!("Unknown model: {s}"))),
        }
    }
}

impl std::fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LLMBackend::OpenAI => "openai",
            LLMBackend::Google => "google",
            LLMBackend::HuggingFace => "huggingface",
            LLMBackend::Mock => "mock",
        };
        f.write_str(name)
    }
}
