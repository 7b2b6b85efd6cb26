//! Tolerant parsing of generative output into typed results.
//!
//! Backends are asked for JSON but are not trusted to return it. Parsing
//! is total: strict JSON first, then a code-fence-stripped retry, then a
//! tagged degraded fallback. Malformed output never fails a request.

use crate::models::{ActionItem, ActionOutput, Draft};

/// Outcome of a parse attempt. `Degraded` still carries a usable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Parse<T> {
    Strict(T),
    Degraded(T),
}

impl<T> Parse<T> {
    pub fn into_inner(self) -> T {
        match self {
            Parse::Strict(value) | Parse::Degraded(value) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Parse::Degraded(_))
    }
}

/// Models often wrap JSON in a markdown code fence; unwrap it before the
/// lenient retry.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.split_once('\n') {
        Some((_lang, body)) => body,
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parse action-item output. On failure the raw text is wrapped rather
/// than dropped, so the caller always has something to show.
pub fn parse_actions(raw: &str) -> Parse<ActionOutput> {
    if let Ok(items) = serde_json::from_str::<Vec<ActionItem>>(raw) {
        return Parse::Strict(ActionOutput::Items(items));
    }
    if let Ok(items) = serde_json::from_str::<Vec<ActionItem>>(strip_code_fence(raw)) {
        return Parse::Strict(ActionOutput::Items(items));
    }
    Parse::Degraded(ActionOutput::Raw {
        raw: raw.to_string(),
    })
}

/// Parse draft output. On failure, synthesize a reply draft carrying the
/// raw text as its body.
pub fn parse_draft(raw: &str, original_subject: &str) -> Parse<Draft> {
    if let Ok(draft) = serde_json::from_str::<Draft>(raw) {
        return Parse::Strict(draft);
    }
    if let Ok(draft) = serde_json::from_str::<Draft>(strip_code_fence(raw)) {
        return Parse::Strict(draft);
    }
    Parse::Degraded(Draft::new(
        format!("Re: {original_subject}"),
        raw.to_string(),
    ))
}
