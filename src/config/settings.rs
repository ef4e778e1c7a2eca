use std::fs;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::LLMError;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_HF_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
const DEFAULT_TIMEOUT_S: u64 = 40;

/// Backend credentials and process-wide switches.
///
/// Resolved from defaults, then an optional TOML file, then the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub hf_api_token: Option<SecretString>,
    pub hf_model: String,
    /// Per-request timeout in seconds
    pub timeout_s: u64,
    /// Replace every backend with a canned-answer client
    pub mock_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            hf_api_token: None,
            hf_model: DEFAULT_HF_MODEL.to_string(),
            timeout_s: DEFAULT_TIMEOUT_S,
            mock_mode: false,
        }
    }
}

/// On-disk layout; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    openai_api_key: Option<String>,
    openai_model: Option<String>,
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    hf_api_token: Option<String>,
    hf_model: Option<String>,
    timeout_s: Option<u64>,
    mock_mode: Option<bool>,
}

impl Settings {
    /// Loads settings, reading `path` when given and then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, LLMError> {
        let base = match path {
            Some(path) => Self::default().merge_file(path)?,
            None => Self::default(),
        };
        base.merge_env(|key| std::env::var(key).ok())
    }

    /// Overlays the keys present in a TOML file.
    pub fn merge_file(self, path: &Path) -> Result<Self, LLMError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            LLMError::ConfigError(format!("cannot read {}: {err}", path.display()))
        })?;
        self.merge_toml(&contents)
    }

    /// Overlays the keys present in a TOML document.
    pub fn merge_toml(mut self, contents: &str) -> Result<Self, LLMError> {
        let file: SettingsFile = toml::from_str(contents)?;
        overlay_secret(&mut self.openai_api_key, file.openai_api_key);
        overlay(&mut self.openai_model, file.openai_model);
        overlay_secret(&mut self.gemini_api_key, file.gemini_api_key);
        overlay(&mut self.gemini_model, file.gemini_model);
        overlay_secret(&mut self.hf_api_token, file.hf_api_token);
        overlay(&mut self.hf_model, file.hf_model);
        overlay(&mut self.timeout_s, file.timeout_s);
        overlay(&mut self.mock_mode, file.mock_mode);
        Ok(self)
    }

    /// Overlays environment variables, looked up through `var`.
    pub fn merge_env<F>(mut self, var: F) -> Result<Self, LLMError>
    where
        F: Fn(&str) -> Option<String>,
    {
        overlay_secret(&mut self.openai_api_key, var("OPENAI_API_KEY"));
        overlay(&mut self.openai_model, var("OPENAI_MODEL"));
        overlay_secret(&mut self.gemini_api_key, var("GEMINI_API_KEY"));
        overlay(&mut self.gemini_model, var("GEMINI_MODEL"));
        overlay_secret(&mut self.hf_api_token, var("HF_API_TOKEN"));
        overlay(&mut self.hf_model, var("HF_MODEL"));
        if let Some(raw) = var("TIMEOUT_S") {
            self.timeout_s = raw.trim().parse().map_err(|_| {
                LLMError::ConfigError(format!("TIMEOUT_S must be a whole number of seconds, got {raw:?}"))
            })?;
        }
        if let Some(raw) = var("MOCK_MODE") {
            self.mock_mode = is_truthy(&raw);
        }
        Ok(self)
    }
}

fn overlay<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn overlay_secret(slot: &mut Option<SecretString>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *slot = Some(SecretString::new(value));
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
