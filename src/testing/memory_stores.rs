use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::domain::activity::ActivityRecord;
use crate::domain::identities::UserId;
use crate::ports::ActivityStore;

/// Activity store held in memory; can be switched to fail every write.
#[derive(Clone, Default)]
pub struct MemoryActivityStore {
    records: Arc<Mutex<HashMap<UserId, Vec<ActivityRecord>>>>,
    fail_with: Option<String>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { fail_with: Some(message.into()), ..Self::default() }
    }
}

impl ActivityStore for MemoryActivityStore {
    fn append(&self, user: &UserId, record: &ActivityRecord) -> Result<(), AppError> {
        if let Some(message) = &self.fail_with {
            return Err(AppError::Storage(message.clone()));
        }
        self.records.lock().unwrap().entry(user.clone()).or_default().push(record.clone());
        Ok(())
    }

    fn list(&self, user: &UserId) -> Result<Vec<ActivityRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(user).cloned().unwrap_or_default())
    }
}
