use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{read_json, write_json};
use crate::models::{ActionItem, Category};

pub const PROCESSED_FILE: &str = "processed.json";

/// Rule-engine output recorded per email during an ingestion pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedEmail {
    pub category: Category,
    pub actions: Vec<ActionItem>,
}

/// Map from email id to its processed result, persisted as one JSON file.
pub struct FileProcessedStore {
    path: PathBuf,
}

impl FileProcessedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<HashMap<String, ProcessedEmail>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    pub fn save(&self, processed: &HashMap<String, ProcessedEmail>) -> Result<()> {
        write_json(&self.path, processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProcessedStore::new(dir.path().join(PROCESSED_FILE));
        let mut processed = HashMap::new();
        processed.insert(
            "m1".to_string(),
            ProcessedEmail {
                category: Category::ToDo,
                actions: vec![ActionItem::new("Please review")],
            },
        );
        store.save(&processed).unwrap();
        assert_eq!(store.load().unwrap(), processed);
    }

    #[test]
    fn test_missing_file_is_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProcessedStore::new(dir.path().join(PROCESSED_FILE));
        assert!(store.load().unwrap().is_empty());
    }
}
