use super::{PersistenceError, RecordStore};
use std::collections::HashMap;

/// Process-local backend; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    entries: HashMap<String, String>,
}

impl MemoryRecordStore {
    pub fn with_entry(mut self, key: &str, payload: &str) -> Self {
        self.entries.insert(key.to_string(), payload.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl RecordStore for MemoryRecordStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}
