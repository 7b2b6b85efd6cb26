//! JSON-file persistence for prompts, drafts, and ingestion results.
//!
//! The traits are the seam for alternative backends (e.g. a document
//! store); the orchestrator and CLI depend only on them.

pub mod draft_store;
pub mod processed_store;
pub mod prompt_store;

pub use draft_store::{DraftStore, FileDraftStore};
pub use processed_store::{FileProcessedStore, ProcessedEmail};
pub use prompt_store::{FilePromptStore, PromptStore};

use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Per-user data directory holding the inbox, prompts, drafts, and
/// processed results.
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".config").join("mailmind"))
}

/// Read a JSON value from `path`; a missing file is `None`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(Some(value))
}

/// Write a JSON value to `path`, creating parent directories as needed.
/// Replaces the whole file: last write wins.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    Ok(())
}
