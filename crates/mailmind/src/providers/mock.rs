use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::errors::{AgentError, AgentResult};
use crate::providers::base::Provider;

/// A mock backend that returns pre-configured responses for testing.
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
}

impl MockProvider {
    /// Create a new mock backend with a sequence of responses.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            failure: None,
        }
    }

    /// A backend whose every call fails with `BackendRequest`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, _prompt: &str, _max_output_tokens: u32) -> AgentResult<String> {
        if let Some(message) = &self.failure {
            return Err(AgentError::BackendRequest(message.clone()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty text if no more pre-configured responses
            Ok(String::new())
        } else {
            Ok(responses.remove(0))
        }
    }
}
