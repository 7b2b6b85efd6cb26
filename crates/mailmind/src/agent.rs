//! Intent classification and the per-request orchestrator.

use strum_macros::Display;

use crate::errors::AgentResult;
use crate::models::{ActionOutput, AgentResponse, Draft, Email};
use crate::parser;
use crate::prompts::PromptSet;
use crate::providers::base::{Provider, DEFAULT_MAX_OUTPUT_TOKENS, DRAFT_MAX_OUTPUT_TOKENS};
use crate::providers::factory;
use crate::rules;

/// Token budget for the deterministic offline summary.
pub const OFFLINE_SUMMARY_TOKENS: usize = 50;

const OFFLINE_DRAFT_BODY: &str = "Thanks for reaching out — I'll get back to you soon.";
const OFFLINE_GENERAL_TEXT: &str = "Generative backend not configured; offline mode is limited.";
const DRAFT_CREATED_TEXT: &str = "Draft created";

/// The classified purpose of a user instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Intent {
    Summarize,
    ExtractTasks,
    DraftReply,
    GeneralQuery,
}

/// Ordered instruction classification, total over all strings: anything
/// that matches no earlier rule is a general query. Broader instructions
/// deliberately fall through to the most general handler.
pub fn classify_intent(instruction: &str) -> Intent {
    let normalized = instruction.trim().to_lowercase();
    if normalized.is_empty() || normalized == "summarize this email" {
        return Intent::Summarize;
    }
    if normalized.contains("task") || normalized.contains("todo") {
        return Intent::ExtractTasks;
    }
    if normalized.contains("reply") || normalized.contains("draft") {
        return Intent::DraftReply;
    }
    Intent::GeneralQuery
}

/// The tone hint following the first case-insensitive `tone:` marker,
/// trimmed; empty when absent. Scans the original string so multi-byte
/// text before the marker cannot skew the offset.
pub fn extract_tone(instruction: &str) -> String {
    const MARKER: &str = "tone:";
    for (idx, _) in instruction.char_indices() {
        if let Some(candidate) = instruction.get(idx..idx + MARKER.len()) {
            if candidate.eq_ignore_ascii_case(MARKER) {
                return instruction[idx + MARKER.len()..].trim().to_string();
            }
        }
    }
    String::new()
}

fn offline_summary(body: &str) -> String {
    let tokens: Vec<&str> = body
        .split_whitespace()
        .take(OFFLINE_SUMMARY_TOKENS)
        .collect();
    format!("{}...", tokens.join(" "))
}

/// Per-request classifier and dispatcher. Holds no state besides the
/// backend handle chosen at startup; prompts and emails are passed in
/// explicitly on every call.
pub struct Agent {
    provider: Option<Box<dyn Provider>>,
}

impl Agent {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// An agent with no backend: every intent takes its offline path.
    pub fn offline() -> Self {
        Self { provider: None }
    }

    /// Build from the environment. An unavailable backend selects the
    /// offline path; it is not an error.
    pub fn from_env() -> Self {
        match factory::from_env() {
            Ok(provider) => Self::new(provider),
            Err(e) => {
                tracing::info!(reason = %e, "running in offline mode");
                Self::offline()
            }
        }
    }

    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    /// Apply one instruction to one email. Backend request failures
    /// propagate; malformed backend output never does.
    pub async fn reply(
        &self,
        email: &Email,
        instruction: &str,
        prompts: &PromptSet,
    ) -> AgentResult<AgentResponse> {
        let intent = classify_intent(instruction);
        tracing::debug!(%intent, email_id = %email.id, online = self.is_online(), "dispatching");
        match intent {
            Intent::Summarize => self.summarize(email).await,
            Intent::ExtractTasks => self.extract_tasks(email, prompts).await,
            Intent::DraftReply => self.draft_reply(email, instruction, prompts).await,
            Intent::GeneralQuery => self.general_query(email, instruction, prompts).await,
        }
    }

    async fn summarize(&self, email: &Email) -> AgentResult<AgentResponse> {
        match &self.provider {
            Some(provider) => {
                let prompt = format!(
                    "Summarize the following email:\n\nSubject: {}\n\nBody:\n{}",
                    email.subject, email.body
                );
                let text = provider.generate(&prompt, DEFAULT_MAX_OUTPUT_TOKENS).await?;
                Ok(AgentResponse::text(text))
            }
            None => Ok(AgentResponse::text(offline_summary(&email.body))),
        }
    }

    async fn extract_tasks(
        &self,
        email: &Email,
        prompts: &PromptSet,
    ) -> AgentResult<AgentResponse> {
        match &self.provider {
            Some(provider) => {
                let prompt = format!("{}\n\nEmail:\n{}", prompts.action_item, email.body);
                let raw = provider.generate(&prompt, DEFAULT_MAX_OUTPUT_TOKENS).await?;
                let parsed = parser::parse_actions(&raw);
                if parsed.is_degraded() {
                    tracing::warn!(email_id = %email.id, "action output did not parse; wrapping raw text");
                }
                Ok(AgentResponse::actions(parsed.into_inner()))
            }
            None => Ok(AgentResponse::actions(ActionOutput::Items(
                rules::extract_actions(email, &prompts.action_item),
            ))),
        }
    }

    async fn draft_reply(
        &self,
        email: &Email,
        instruction: &str,
        prompts: &PromptSet,
    ) -> AgentResult<AgentResponse> {
        let tone = extract_tone(instruction);
        match &self.provider {
            Some(provider) => {
                let mut prompt = format!(
                    "{}\nTone: {}\n\nEmail Subject: {}\nEmail Body:\n{}",
                    prompts.auto_reply, tone, email.subject, email.body
                );
                if !prompts.tone_instructions.trim().is_empty() {
                    // advisory clause, not a capability of its own
                    prompt.push_str("\n\n");
                    prompt.push_str(&prompts.tone_instructions);
                }
                let raw = provider.generate(&prompt, DRAFT_MAX_OUTPUT_TOKENS).await?;
                let parsed = parser::parse_draft(&raw, &email.subject);
                if parsed.is_degraded() {
                    tracing::warn!(email_id = %email.id, "draft output did not parse; synthesizing reply");
                }
                Ok(AgentResponse::draft(parsed.into_inner()).with_text(DRAFT_CREATED_TEXT))
            }
            None => Ok(AgentResponse::draft(Draft::new(
                format!("Re: {}", email.subject),
                OFFLINE_DRAFT_BODY,
            ))),
        }
    }

    async fn general_query(
        &self,
        email: &Email,
        instruction: &str,
        prompts: &PromptSet,
    ) -> AgentResult<AgentResponse> {
        match &self.provider {
            Some(provider) => {
                let prompt = format!(
                    "User query: {}\n\nEmail:\nSubject: {}\n{}\n\nUse these prompts:\n{}",
                    instruction, email.subject, email.body, prompts
                );
                let text = provider.generate(&prompt, DEFAULT_MAX_OUTPUT_TOKENS).await?;
                Ok(AgentResponse::text(text))
            }
            None => Ok(AgentResponse::text(OFFLINE_GENERAL_TEXT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AgentError;
    use crate::models::ActionItem;
    use crate::providers::mock::MockProvider;

    fn team_sync_email() -> Email {
        Email::new(
            "m1",
            "pm@example.com",
            "Team Sync",
            "Could you send the deck by Friday?",
        )
    }

    #[test]
    fn test_summarize_intent_matches() {
        for instruction in ["", "   ", "Summarize this email", "  SUMMARIZE THIS EMAIL  "] {
            assert_eq!(classify_intent(instruction), Intent::Summarize, "{instruction:?}");
        }
    }

    #[test]
    fn test_task_intent_matches() {
        assert_eq!(classify_intent("what are my tasks"), Intent::ExtractTasks);
        assert_eq!(classify_intent("build a TODO list"), Intent::ExtractTasks);
    }

    #[test]
    fn test_reply_intent_matches() {
        assert_eq!(classify_intent("draft a reply"), Intent::DraftReply);
        assert_eq!(classify_intent("Reply to this"), Intent::DraftReply);
    }

    #[test]
    fn test_task_outranks_reply() {
        // "task" is checked before "reply"
        assert_eq!(
            classify_intent("reply with my tasks"),
            Intent::ExtractTasks
        );
    }

    #[test]
    fn test_everything_else_is_general() {
        assert_eq!(classify_intent("who sent this?"), Intent::GeneralQuery);
        assert_eq!(classify_intent("?!"), Intent::GeneralQuery);
    }

    #[test]
    fn test_tone_extraction() {
        assert_eq!(extract_tone("Draft a reply tone: friendly"), "friendly");
        assert_eq!(extract_tone("draft a reply"), "");
        assert_eq!(extract_tone("reply Tone:  professional "), "professional");
    }

    #[test]
    fn test_tone_extraction_after_multibyte_text() {
        // "İ" grows when lowercased; the hint must still come out intact
        assert_eq!(extract_tone("İstanbul reply TONE: warm"), "warm");
        assert_eq!(extract_tone("naïve draft tone: crisp"), "crisp");
        assert_eq!(extract_tone("draft a reply tone:"), "");
    }

    #[tokio::test]
    async fn test_offline_summary_truncates_with_ellipsis() {
        let agent = Agent::offline();
        let response = agent
            .reply(&team_sync_email(), "", &PromptSet::default())
            .await
            .unwrap();
        assert_eq!(
            response.text.as_deref(),
            Some("Could you send the deck by Friday?...")
        );
        assert!(!response.structured);
    }

    #[tokio::test]
    async fn test_offline_summary_caps_at_fifty_tokens() {
        let body = (0..80).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let email = Email::new("m2", "a@b", "Long", body);
        let agent = Agent::offline();
        let response = agent.reply(&email, "", &PromptSet::default()).await.unwrap();
        let text = response.text.unwrap();
        assert!(text.ends_with("..."));
        assert_eq!(
            text.trim_end_matches("...").split_whitespace().count(),
            OFFLINE_SUMMARY_TOKENS
        );
    }

    #[tokio::test]
    async fn test_offline_task_extraction_uses_rules() {
        let agent = Agent::offline();
        let response = agent
            .reply(&team_sync_email(), "what are my tasks", &PromptSet::default())
            .await
            .unwrap();
        assert!(response.structured);
        assert_eq!(
            response.actions,
            Some(ActionOutput::Items(vec![ActionItem::new(
                "Could you send the deck by Friday?"
            )]))
        );
    }

    #[tokio::test]
    async fn test_offline_draft_is_canned_acknowledgement() {
        let agent = Agent::offline();
        let response = agent
            .reply(&team_sync_email(), "draft a reply", &PromptSet::default())
            .await
            .unwrap();
        assert!(response.structured);
        let draft = response.draft.unwrap();
        assert_eq!(draft.subject, "Re: Team Sync");
        assert_eq!(draft.body, OFFLINE_DRAFT_BODY);
    }

    #[tokio::test]
    async fn test_offline_general_query_explains_limitation() {
        let agent = Agent::offline();
        let response = agent
            .reply(&team_sync_email(), "who is this from?", &PromptSet::default())
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some(OFFLINE_GENERAL_TEXT));
    }

    #[tokio::test]
    async fn test_online_summary_returns_backend_text() {
        let agent = Agent::new(Box::new(MockProvider::new(vec![
            "A quick sync about the deck.".to_string(),
        ])));
        let response = agent
            .reply(&team_sync_email(), "summarize this email", &PromptSet::default())
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some("A quick sync about the deck."));
    }

    #[tokio::test]
    async fn test_online_tasks_parse_backend_json() {
        let agent = Agent::new(Box::new(MockProvider::new(vec![
            r#"[{"task": "Send deck", "deadline": "Friday", "assignee": ""}]"#.to_string(),
        ])));
        let response = agent
            .reply(&team_sync_email(), "list my todos", &PromptSet::default())
            .await
            .unwrap();
        match response.actions.unwrap() {
            ActionOutput::Items(items) => {
                assert_eq!(items[0].task, "Send deck");
                assert_eq!(items[0].deadline, "Friday");
            }
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_online_tasks_wrap_malformed_output() {
        let agent = Agent::new(Box::new(MockProvider::new(vec![
            "no tasks here".to_string(),
        ])));
        let response = agent
            .reply(&team_sync_email(), "any tasks?", &PromptSet::default())
            .await
            .unwrap();
        assert_eq!(
            response.actions,
            Some(ActionOutput::Raw {
                raw: "no tasks here".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_online_draft_reports_creation() {
        let agent = Agent::new(Box::new(MockProvider::new(vec![
            r#"{"subject": "Re: Team Sync", "body": "On it."}"#.to_string(),
        ])));
        let response = agent
            .reply(
                &team_sync_email(),
                "draft a reply tone: friendly",
                &PromptSet::default(),
            )
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some("Draft created"));
        assert_eq!(response.draft.unwrap().body, "On it.");
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let agent = Agent::new(Box::new(MockProvider::failing("boom")));
        let err = agent
            .reply(&team_sync_email(), "", &PromptSet::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::BackendRequest(_)));
    }
}
