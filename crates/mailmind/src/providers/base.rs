use async_trait::async_trait;

use crate::errors::AgentResult;

/// Output budget for ordinary generative calls.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 300;
/// Larger budget for full reply drafts.
pub const DRAFT_MAX_OUTPUT_TOKENS: u32 = 400;

/// Base trait for generative text backends (Gemini, Ollama, etc).
///
/// One capability only: render a prompt into text with a bounded output
/// size. No conversation state, no tool calling. Implementations must not
/// retry internally; retries, if wanted, belong to the caller.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> AgentResult<String>;
}
