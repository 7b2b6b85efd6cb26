use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::Provider;
use super::configs::GeminiProviderConfig;
use crate::errors::{AgentError, AgentResult};

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { client, config })
    }

    fn get_text(data: &Value) -> AgentResult<String> {
        data.get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.pointer("/content/parts/0/text"))
            .and_then(|text| text.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| AgentError::BackendRequest(format!("No text in response: {data}")))
    }

    async fn post(&self, payload: Value) -> AgentResult<Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
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
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> AgentResult<String> {
        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": max_output_tokens
            }
        });

        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            return Err(AgentError::BackendRequest(format!(
                "Gemini API error: {error}"
            )));
        }

        let text = Self::get_text(&response)?;
        tracing::debug!(model = %self.config.model, bytes = text.len(), "gemini response");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_for(server: &mockito::ServerGuard) -> GeminiProvider {
        GeminiProvider::new(GeminiProviderConfig {
            host: server.url(),
            api_key: "test-key".to_string(),
            model: GEMINI_MODEL.to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_extracts_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                format!("/v1beta/models/{GEMINI_MODEL}:generateContent").as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "A short summary." }] }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = provider_for(&server);
        let text = provider.generate("Summarize this", 300).await.unwrap();
        assert_eq!(text, "A short summary.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_backend_request() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                format!("/v1beta/models/{GEMINI_MODEL}:generateContent").as_str(),
            )
            .with_status(500)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.generate("hello", 300).await.unwrap_err();
        assert!(matches!(err, AgentError::BackendRequest(_)));
    }

    #[tokio::test]
    async fn test_missing_candidates_is_backend_request() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                format!("/v1beta/models/{GEMINI_MODEL}:generateContent").as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "candidates": [] }).to_string())
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.generate("hello", 300).await.unwrap_err();
        assert!(matches!(err, AgentError::BackendRequest(_)));
    }
}
