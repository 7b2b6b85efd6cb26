use std::path::PathBuf;

use anyhow::Result;

use crate::models::Email;
use crate::storage::read_json;

pub const INBOX_FILE: &str = "mock_inbox.json";

/// Read-only mailbox collaborator. The agent never mutates the inbox.
pub trait Mailbox {
    fn fetch(&self) -> Result<Vec<Email>>;
}

/// A mailbox backed by a JSON array of emails on disk. A missing file is
/// an empty inbox, not an error.
pub struct FileMailbox {
    path: PathBuf,
}

impl FileMailbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Mailbox for FileMailbox {
    fn fetch(&self) -> Result<Vec<Email>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }
}
