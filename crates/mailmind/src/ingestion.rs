//! Batch rule-engine pass over the inbox.

use std::collections::HashMap;

use anyhow::Result;

use crate::mailbox::Mailbox;
use crate::prompts::PromptSet;
use crate::rules;
use crate::storage::{FileProcessedStore, ProcessedEmail};

/// Categorize and extract actions for every email not yet in the
/// processed map, then persist the map. Already-processed ids are left
/// untouched, so re-running is cheap and idempotent. Emails with no id
/// are keyed by inbox position.
pub fn run_ingestion(
    mailbox: &dyn Mailbox,
    store: &FileProcessedStore,
    prompts: &PromptSet,
) -> Result<HashMap<String, ProcessedEmail>> {
    let inbox = mailbox.fetch()?;
    let mut processed = store.load()?;
    let mut fresh = 0usize;

    for (idx, email) in inbox.iter().enumerate() {
        let key = if email.id.is_empty() {
            idx.to_string()
        } else {
            email.id.clone()
        };
        if processed.contains_key(&key) {
            continue;
        }
        processed.insert(
            key,
            ProcessedEmail {
                category: rules::categorize(email, &prompts.categorization),
                actions: rules::extract_actions(email, &prompts.action_item),
            },
        );
        fresh += 1;
    }

    store.save(&processed)?;
    tracing::info!(total = processed.len(), fresh, "ingestion pass complete");
    Ok(processed)
}
