//! Deterministic offline heuristics over email text.
//!
//! Pure functions: same email in, same result out, no I/O. The prompt
//! template parameters mirror the generative path's signature and are not
//! interpreted here.

use crate::models::{ActionItem, Category, Email};

const TODO_KEYWORDS: [&str; 5] = ["please", "could you", "kindly", "deadline", "due"];
const SPAM_KEYWORDS: [&str; 2] = ["sale", "free"];
const ACTION_PREFIXES: [&str; 6] = ["please", "could you", "kindly", "review", "update", "send"];

/// Ordered, first-match-wins categorization. The ordering is a deliberate
/// tie-break: a newsletter containing "sale" is still a newsletter.
pub fn categorize(email: &Email, _categorization_prompt: &str) -> Category {
    let subject = email.subject.to_lowercase();
    let body = email.body.to_lowercase();

    if body.contains("unsubscribe") || subject.contains("newsletter") {
        return Category::Newsletter;
    }
    if SPAM_KEYWORDS.iter().any(|word| body.contains(word)) {
        return Category::Spam;
    }
    if TODO_KEYWORDS.iter().any(|word| body.contains(word)) {
        return Category::ToDo;
    }
    Category::Important
}

/// One action item per body line that opens with a request verb, in
/// source order. Line casing is preserved; surrounding whitespace is not.
pub fn extract_actions(email: &Email, _action_prompt: &str) -> Vec<ActionItem> {
    email
        .body
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let lowered = trimmed.to_lowercase();
            ACTION_PREFIXES
                .iter()
                .any(|prefix| lowered.starts_with(prefix))
                .then(|| ActionItem::new(trimmed))
        })
        .collect()
}
