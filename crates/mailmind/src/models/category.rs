use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Deterministic categorization labels. `To-Do` keeps its hyphenated wire
/// form for compatibility with previously processed inboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Category {
    Newsletter,
    Spam,
    #[serde(rename = "To-Do")]
    #[strum(serialize = "To-Do")]
    ToDo,
    Important,
}
