use serde::{Deserialize, Serialize};

/// A single extracted task. `deadline` and `assignee` are empty strings
/// when the source email does not specify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub assignee: String,
}

impl ActionItem {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            deadline: String::new(),
            assignee: String::new(),
        }
    }
}
