use std::path::PathBuf;

use anyhow::Result;

use super::{read_json, write_json};
use crate::prompts::PromptSet;

pub const PROMPT_FILE: &str = "prompts.json";

/// Prompt persistence. Loads always return a fully populated set; saves
/// replace the stored set wholesale (no version history).
pub trait PromptStore {
    fn load(&self) -> Result<PromptSet>;
    fn save(&self, prompts: &PromptSet) -> Result<()>;
    fn reset(&self) -> Result<()>;
}

pub struct FilePromptStore {
    path: PathBuf,
}

impl FilePromptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PromptStore for FilePromptStore {
    fn load(&self) -> Result<PromptSet> {
        match read_json::<PromptSet>(&self.path)? {
            Some(mut prompts) => {
                prompts.fill_defaults();
                Ok(prompts)
            }
            None => {
                let defaults = PromptSet::default();
                self.save(&defaults)?;
                Ok(defaults)
            }
        }
    }

    fn save(&self, prompts: &PromptSet) -> Result<()> {
        prompts.validate()?;
        write_json(&self.path, prompts)
    }

    fn reset(&self) -> Result<()> {
        self.save(&PromptSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AgentError;

    fn store_in(dir: &tempfile::TempDir) -> FilePromptStore {
        FilePromptStore::new(dir.path().join(PROMPT_FILE))
    }

    #[test]
    fn test_first_load_installs_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), PromptSet::default());
        // the defaults were persisted, not just returned
        assert!(dir.path().join(PROMPT_FILE).exists());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut custom = PromptSet::default();
        custom.categorization = "Sort this email.".to_string();
        store.save(&custom).unwrap();
        assert_eq!(store.load().unwrap(), custom);
    }

    #[test]
    fn test_save_rejects_incomplete_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut incomplete = PromptSet::default();
        incomplete.action_item = String::new();
        let err = store.save(&incomplete).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AgentError>(),
            Some(AgentError::Validation(_))
        ));
        // nothing was written
        assert!(!dir.path().join(PROMPT_FILE).exists());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut custom = PromptSet::default();
        custom.auto_reply = "Write a terse reply.".to_string();
        store.save(&custom).unwrap();
        store.reset().unwrap();
        assert_eq!(store.load().unwrap(), PromptSet::default());
    }

    #[test]
    fn test_load_fills_gaps_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROMPT_FILE);
        std::fs::write(&path, r#"{"categorization": "custom"}"#).unwrap();
        let loaded = FilePromptStore::new(&path).load().unwrap();
        assert_eq!(loaded.categorization, "custom");
        assert_eq!(loaded.action_item, PromptSet::default().action_item);
    }
}
