use serde::{Deserialize, Serialize};

/// A message as fetched from the mailbox collaborator. Immutable once
/// loaded; the agent only ever reads it. Absent fields deserialize to
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Email {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    /// Provider-defined, treated as opaque.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub body: String,
}

impl Email {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            subject: subject.into(),
            timestamp: String::new(),
            body: body.into(),
        }
    }
}
