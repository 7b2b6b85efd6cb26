use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AgentError, AgentResult};

pub const DEFAULT_CATEGORIZATION: &str = "Categorize this email into one of: Important, Newsletter, Spam, To-Do.\nAnswer with a single category and short explanation. 'To-Do' must be used when the email contains a direct request requiring user action.";

pub const DEFAULT_ACTION_ITEM: &str = "Extract action items from the email. Respond in JSON array form where each item has: {\"task\": \"...\", \"deadline\": \"...\", \"assignee\": \"...\"}\nIf no explicit deadline or assignee, use empty strings.";

pub const DEFAULT_AUTO_REPLY: &str = "Draft a polite reply based on the email content. Keep it concise (3-6 sentences). Include a suggested subject if applicable. Do NOT send — return as a draft object: { 'subject': '...', 'body': '...' }.";

pub const DEFAULT_TONE_INSTRUCTIONS: &str = "If user specifies a tone (friendly/professional/concise), adapt the reply accordingly.";

/// The user-editable instruction templates driving generative calls.
/// `tone_instructions` is advisory guidance appended to reply drafting,
/// not a capability of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSet {
    #[serde(default)]
    pub categorization: String,
    #[serde(default)]
    pub action_item: String,
    #[serde(default)]
    pub auto_reply: String,
    #[serde(default)]
    pub tone_instructions: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            categorization: DEFAULT_CATEGORIZATION.to_string(),
            action_item: DEFAULT_ACTION_ITEM.to_string(),
            auto_reply: DEFAULT_AUTO_REPLY.to_string(),
            tone_instructions: DEFAULT_TONE_INSTRUCTIONS.to_string(),
        }
    }
}

impl PromptSet {
    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("categorization", &self.categorization),
            ("action_item", &self.action_item),
            ("auto_reply", &self.auto_reply),
            ("tone_instructions", &self.tone_instructions),
        ]
    }

    /// Every template must be present and non-blank before a save.
    pub fn validate(&self) -> AgentResult<()> {
        for (key, text) in self.entries() {
            if text.trim().is_empty() {
                return Err(AgentError::Validation(format!(
                    "missing prompt template '{key}'"
                )));
            }
        }
        Ok(())
    }

    /// Replace blank templates with the defaults. Applied after every load
    /// so callers always see all four templates populated.
    pub fn fill_defaults(&mut self) {
        let defaults = PromptSet::default();
        if self.categorization.trim().is_empty() {
            self.categorization = defaults.categorization;
        }
        if self.action_item.trim().is_empty() {
            self.action_item = defaults.action_item;
        }
        if self.auto_reply.trim().is_empty() {
            self.auto_reply = defaults.auto_reply;
        }
        if self.tone_instructions.trim().is_empty() {
            self.tone_instructions = defaults.tone_instructions;
        }
    }
}

impl fmt::Display for PromptSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, text) in self.entries() {
            writeln!(f, "{key}: {text}")?;
        }
        Ok(())
    }
}
