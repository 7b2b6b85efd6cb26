use std::env;

use anyhow::Result;

use super::{
    base::Provider,
    configs::{GeminiProviderConfig, OllamaProviderConfig, ProviderConfig},
    gemini::{GeminiProvider, GEMINI_HOST, GEMINI_MODEL},
    ollama::{OllamaProvider, OLLAMA_MODEL},
};
use crate::errors::{AgentError, AgentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Gemini,
    Ollama,
}

impl ProviderType {
    /// Backend selected by the environment, if any: `GEMINI_API_KEY`
    /// first, then `OLLAMA_HOST`.
    pub fn from_env() -> Option<Self> {
        if env::var("GEMINI_API_KEY").is_ok_and(|key| !key.trim().is_empty()) {
            return Some(ProviderType::Gemini);
        }
        if env::var("OLLAMA_HOST").is_ok_and(|host| !host.trim().is_empty()) {
            return Some(ProviderType::Ollama);
        }
        None
    }
}

pub fn get_provider(config: ProviderConfig) -> Result<Box<dyn Provider>> {
    match config {
        ProviderConfig::Gemini(gemini_config) => Ok(Box::new(GeminiProvider::new(gemini_config)?)),
        ProviderConfig::Ollama(ollama_config) => Ok(Box::new(OllamaProvider::new(ollama_config)?)),
    }
}

/// Resolve a backend from the environment. Checked once at startup; the
/// outcome is fixed for the rest of the run. `BackendUnavailable` here
/// means "take the offline path", not a failure to surface.
pub fn from_env() -> AgentResult<Box<dyn Provider>> {
    let config = match ProviderType::from_env() {
        Some(ProviderType::Gemini) => ProviderConfig::Gemini(GeminiProviderConfig {
            host: env::var("GEMINI_HOST").unwrap_or_else(|_| GEMINI_HOST.to_string()),
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_MODEL.to_string()),
        }),
        Some(ProviderType::Ollama) => ProviderConfig::Ollama(OllamaProviderConfig {
            host: env::var("OLLAMA_HOST").unwrap_or_default(),
            model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| OLLAMA_MODEL.to_string()),
        }),
        None => return Err(AgentError::BackendUnavailable),
    };
    get_provider(config).map_err(|e| AgentError::BackendRequest(e.to_string()))
}
