use serde::{Deserialize, Serialize};

use super::action::ActionItem;
use super::draft::Draft;

/// Action-extraction output. `Raw` carries the backend's text verbatim
/// when it could not be parsed into items (degraded mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutput {
    Items(Vec<ActionItem>),
    Raw { raw: String },
}

/// The orchestrator's output envelope. Exactly one of text-only, actions,
/// or draft is populated per intent; `structured` is true whenever actions
/// or a draft are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub structured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<Draft>,
}

impl AgentResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            structured: false,
            actions: None,
            draft: None,
        }
    }

    pub fn actions(actions: ActionOutput) -> Self {
        Self {
            text: None,
            structured: true,
            actions: Some(actions),
            draft: None,
        }
    }

    pub fn draft(draft: Draft) -> Self {
        Self {
            text: None,
            structured: true,
            actions: None,
            draft: Some(draft),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
