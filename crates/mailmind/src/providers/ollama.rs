use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::Provider;
use super::configs::OllamaProviderConfig;
use crate::errors::{AgentError, AgentResult};
use anyhow::Result;

pub const OLLAMA_HOST: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "qwen2.5";

pub struct OllamaProvider {
    client: Client,
    config: OllamaProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // local models can be slow
            .build()?;

        Ok(Self { client, config })
    }

    fn get_text(data: &Value) -> AgentResult<String> {
        data.pointer("/choices/0/message/content")
            .and_then(|text| text.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| AgentError::BackendRequest(format!("No text in response: {data}")))
    }

    async fn post(&self, payload: Value) -> AgentResult<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgentError::BackendRequest(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| AgentError::BackendRequest(e.to_string())),
            status => Err(AgentError::BackendRequest(format!(
                "Request failed: {status}"
            ))),
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> AgentResult<String> {
        let payload = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": max_output_tokens
        });

        let response = self.post(payload).await?;
        let text = Self::get_text(&response)?;
        tracing::debug!(model = %self.config.model, bytes = text.len(), "ollama response");
        Ok(text)
    }
}
