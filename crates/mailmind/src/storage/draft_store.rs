use std::path::PathBuf;

use anyhow::Result;

use super::{read_json, write_json};
use crate::models::{Draft, DraftRecord};

pub const DRAFT_FILE: &str = "drafts.json";

/// Durable draft records, tagged with an owner identity. Saving never
/// sends anything; `record_external_id` is for callers that later push a
/// draft to a mailbox provider.
pub trait DraftStore {
    fn save(&self, draft: Draft, owner: &str) -> Result<DraftRecord>;
    fn list(&self) -> Result<Vec<DraftRecord>>;
    fn record_external_id(&self, id: &str, external_id: &str) -> Result<()>;
}

pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftStore for FileDraftStore {
    fn save(&self, draft: Draft, owner: &str) -> Result<DraftRecord> {
        let mut drafts = self.list()?;
        let record = DraftRecord::from_draft(draft, owner);
        drafts.push(record.clone());
        write_json(&self.path, &drafts)?;
        Ok(record)
    }

    fn list(&self) -> Result<Vec<DraftRecord>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn record_external_id(&self, id: &str, external_id: &str) -> Result<()> {
        let mut drafts = self.list()?;
        let record = drafts
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| anyhow::anyhow!("No draft with id {id}"))?;
        record.external_id = Some(external_id.to_string());
        write_json(&self.path, &drafts)
    }
}
