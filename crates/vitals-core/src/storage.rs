//! Key-value storage port
//!
//! The metrics log persists through [`StoragePort`] so the bounded-log logic
//! runs the same against browser `localStorage` and the in-memory store used
//! natively and in tests.

use std::collections::HashMap;

use crate::error::VitalsError;

/// String key-value store the metrics log is persisted to
pub trait StoragePort {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, VitalsError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), VitalsError>;
}

impl<S: StoragePort + ?Sized> StoragePort for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, VitalsError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), VitalsError> {
        (**self).set(key, value)
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry, e.g. a value left behind by an earlier page load
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Make every subsequent `set` fail, as a full or disabled store would
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, VitalsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), VitalsError> {
        if self.fail_writes {
            return Err(VitalsError::Storage(format!(
                "Quota exceeded writing {:?}",
                key
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
