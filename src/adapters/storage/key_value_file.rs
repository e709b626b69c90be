use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ACHIEVEMENTS_FILE, user_dir};
use crate::domain::{AppError, UserId};
use crate::ports::KeyValueStore;

/// Key/value pairs persisted as a flat JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Achievement flags of `user` below `data_dir`.
    pub fn for_user(data_dir: &Path, user: &UserId) -> Self {
        Self::new(user_dir(data_dir, user).join(ACHIEVEMENTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|err| AppError::ParseError {
            what: self.path.display().to_string(),
            details: err.to_string(),
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|err| AppError::Storage(err.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, format!("{}\n", content))?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}
