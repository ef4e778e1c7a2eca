use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "google")]
use crate::backends::google::Google;
#[cfg(feature = "huggingface")]
use crate::backends::huggingface::HuggingFace;
#[cfg(feature = "openai")]
use crate::backends::openai::OpenAI;
use crate::{backends::mock::MockClient, client::LLMClient, config::Settings, error::LLMError};

use super::backend::LLMBackend;

/// Clients keyed by the lower-cased model name they were requested under.
pub type ClientSet = IndexMap<String, Box<dyn LLMClient>>;

/// Builds backend clients from model names and [`Settings`].
pub struct ClientFactory;

impl ClientFactory {
    /// Builds one client for `name`.
    ///
    /// In mock mode every name gets a [`MockClient`] called after it.
    pub fn create(name: &str, settings: &Settings) -> Result<Box<dyn LLMClient>, LLMError> {
        let name = name.trim().to_lowercase();
        if settings.mock_mode {
            return Ok(Box::new(MockClient::new(name)));
        }
        let backend: LLMBackend = name.parse()?;
        build(backend, &name, settings)
    }

    /// Builds a client per model name. Blank names are skipped; a repeated
    /// name keeps its first position and the last client built for it.
    pub fn create_all<I, S>(models: I, settings: &Settings) -> Result<ClientSet, LLMError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut clients = ClientSet::new();
        for model in models {
            let model = model.as_ref().trim();
            if model.is_empty() {
                continue;
            }
            let client = Self::create(model, settings)?;
            log::debug!("created client {} for {model}", client.name());
            clients.insert(model.to_lowercase(), client);
        }
        Ok(clients)
    }
}

fn secret(value: &Option<SecretString>) -> String {
    value
        .as_ref()
        .map(|key| key.expose_secret().to_string())
        .unwrap_or_default()
}

fn build(
    backend: LLMBackend,
    name: &str,
    settings: &Settings,
) -> Result<Box<dyn LLMClient>, LLMError> {
    let timeout = Some(settings.timeout_s);
    match backend {
        #[cfg(feature = "openai")]
        LLMBackend::OpenAI => Ok(Box::new(OpenAI::new(
            secret(&settings.openai_api_key),
            Some(settings.openai_model.clone()),
            timeout,
        )?)),
        #[cfg(feature = "google")]
        LLMBackend::Google => Ok(Box::new(Google::new(
            secret(&settings.gemini_api_key),
            Some(settings.gemini_model.clone()),
            timeout,
        )?)),
        #[cfg(feature = "huggingface")]
        LLMBackend::HuggingFace => Ok(Box::new(HuggingFace::new(
            secret(&settings.hf_api_token),
            Some(settings.hf_model.clone()),
            timeout,
        )?)),
        LLMBackend::Mock => Ok(Box::new(MockClient::new(name))),
        #[allow(unreachable_patterns)]
        other => Err(LLMError::ConfigError(format!(
            "{other} support is not enabled in this build"
        ))),
    }
}
