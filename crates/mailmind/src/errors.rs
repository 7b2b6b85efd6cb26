use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum AgentError {
    #[error("Invalid prompt set: {0}")]
    Validation(String),

    /// No generative backend is configured. Only ever used to select the
    /// offline path, never surfaced as a user-visible failure.
    #[error("No generative backend configured")]
    BackendUnavailable,

    #[error("Backend request failed: {0}")]
    BackendRequest(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
