// Unified enum to wrap different backend configurations
pub enum ProviderConfig {
    Gemini(GeminiProviderConfig),
    Ollama(OllamaProviderConfig),
}

pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}

pub struct OllamaProviderConfig {
    pub host: String,
    pub model: String,
}
