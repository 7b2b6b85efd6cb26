use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// An unsent, reviewable reply proposal. Drafts are never sent
/// automatically; pushing one to a mailbox provider is a separate,
/// explicit step taken by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub subject: String,
    pub body: String,
    /// Free-form context, e.g. target recipient or originating email id.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Draft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            meta: Map::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}

/// A persisted draft, enriched with identity and provenance at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub id: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    /// Provider-assigned id, present once the draft has been pushed to a
    /// remote mailbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl DraftRecord {
    pub fn from_draft(draft: Draft, owner: impl Into<String>) -> Self {
        let subject = if draft.subject.is_empty() {
            "(no subject)".to_string()
        } else {
            draft.subject
        };
        Self {
            id: Uuid::new_v4().to_string(),
            subject,
            body: draft.body,
            meta: draft.meta,
            owner: owner.into(),
            created_at: Utc::now(),
            external_id: None,
        }
    }
}
